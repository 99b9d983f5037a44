mod circle;
mod distributed;
mod error;
mod ranking;
mod transform;
pub(crate) mod types;
pub use circle::CircleLayout;
pub use distributed::{DistributedLayout, Stage};
pub use error::LayoutError;
pub use ranking::ConnectivityRank;
use ranking::Neighborhood;
pub use transform::Transform;
pub use types::*;

use crate::config::{ArcTraversal, CircleConfig, DistributedConfig, LayoutConfig, LayoutShape};
use crate::ir::{Graph, NodeId};
use std::collections::{BTreeMap, HashSet, VecDeque};

/// A strategy that assigns a position to every node of a graph.
///
/// Implementors own a [`Transform`] describing where the result sits, so
/// callers can move or scale the finished layout without recomputing it.
pub trait PositionCalc {
    fn calculate(&mut self, graph: &mut Graph) -> Result<(), LayoutError>;

    fn transform(&self) -> &Transform;

    fn transform_mut(&mut self) -> &mut Transform;

    fn move_into(&mut self, graph: &mut Graph, new_center: Point) {
        self.transform_mut().move_into(graph.nodes_mut(), new_center);
    }

    fn scale_to(&mut self, graph: &mut Graph, target: Size) -> Result<(), LayoutError> {
        self.transform_mut().scale_to(graph.nodes_mut(), target)
    }

    fn model_geometric_size(&self) -> Size {
        self.transform().model_geometric_size()
    }

    fn center_point(&self) -> Point {
        self.transform().center_point()
    }
}

pub fn engine_for(config: &LayoutConfig) -> Box<dyn PositionCalc> {
    match config.shape {
        LayoutShape::Circle => Box::new(CircleLayout::new(config.circle.clone())),
        LayoutShape::Distributed => Box::new(DistributedLayout::new(config.distributed.clone())),
    }
}

/// Runs the selected engine and translates the result into positive
/// coordinates (and onto `config.fit`, when set).
pub fn compute_layout(graph: &mut Graph, config: &LayoutConfig) -> Result<Layout, LayoutError> {
    let mut engine = engine_for(config);
    engine.calculate(graph)?;

    if let Some(target) = config.fit {
        if !graph.is_empty() {
            engine.scale_to(graph, target)?;
        }
    }
    let size = engine.model_geometric_size();
    engine.move_into(graph, size.half());

    log::info!(
        "laid out {} nodes as {:?} in {}x{}",
        graph.len(),
        config.shape,
        size.width,
        size.height
    );
    Ok(snapshot(graph, config.shape, engine.center_point(), size))
}

fn snapshot(graph: &Graph, shape: LayoutShape, center: Point, size: Size) -> Layout {
    let nodes = graph
        .nodes()
        .iter()
        .map(|node| {
            let position = node.position();
            let layout = NodeLayout {
                index: node.id.0,
                name: node.name.clone(),
                x: position.x,
                y: position.y,
                color: node.color,
                children: graph.children(node.id).map(|c| c.name.clone()).collect(),
                child_positions: graph.child_positions(node.id),
            };
            (node.name.clone(), layout)
        })
        .collect::<BTreeMap<_, _>>();
    Layout {
        shape,
        nodes,
        center,
        width: size.width,
        height: size.height,
    }
}
