use super::*;
use std::f64::consts::PI;

/// Places every node on one circle around the origin, most children first,
/// with the busiest nodes spread out over the circumference.
#[derive(Debug, Clone)]
pub struct CircleLayout {
    config: CircleConfig,
    transform: Transform,
    known_node_count: usize,
    order: Vec<NodeId>,
}

impl CircleLayout {
    pub fn new(config: CircleConfig) -> Self {
        Self {
            config,
            transform: Transform::new(),
            known_node_count: 0,
            order: Vec::new(),
        }
    }

    /// Order in which nodes were laid around the circle by the last pass,
    /// starting at angle 0.
    pub fn placement_order(&self) -> &[NodeId] {
        &self.order
    }

    fn relative_size(&self, count: usize) -> Size {
        let side = self.config.min_size + count as i32 * self.config.size_per_node;
        Size::square(side + self.config.margin)
    }

    pub(crate) fn radius(&self) -> i32 {
        (self.transform.model_geometric_size().width as f64 / 2.0 * self.config.radius_factor) as i32
    }
}

impl Default for CircleLayout {
    fn default() -> Self {
        Self::new(CircleConfig::default())
    }
}

impl PositionCalc for CircleLayout {
    fn calculate(&mut self, graph: &mut Graph) -> Result<(), LayoutError> {
        graph.validate()?;
        let count = graph.len();
        self.order.clear();
        self.transform.set_center_point(Point::ORIGIN);
        if count == 0 {
            self.known_node_count = 0;
            self.transform.set_current_size(Size::ZERO);
            return Ok(());
        }
        if count != self.known_node_count {
            self.known_node_count = count;
            self.transform.set_current_size(self.relative_size(count));
        }

        let mut order: Vec<NodeId> = graph.ids().collect();
        // Stable: equal child counts keep creation order.
        order.sort_by_key(|id| std::cmp::Reverse(graph.child_count(*id)));
        spread_on_child_count(&mut order);

        let radius = self.radius();
        let step = 2.0 * PI / count as f64;
        for (i, id) in order.iter().enumerate() {
            graph.set_position(*id, Point::ORIGIN.polar_offset(radius, step * i as f64));
        }
        log::debug!("circle layout: {count} nodes at radius {radius}");
        self.order = order;
        Ok(())
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

/// Swaps `len / 3` pairs across the circle so nodes sorted by child count do
/// not bunch up on one side. Index 0 is never moved. Starting at index 1,
/// each swap partner is the slot just before the opposite side, and the next
/// swap starts just before that partner.
pub(crate) fn spread_on_child_count<T>(items: &mut [T]) {
    let len = items.len() as i64;
    if len == 0 {
        return;
    }
    let half = len as f64 / 2.0;
    let mut first: i64 = 1;
    for _ in 0..len / 3 {
        let mut second = ((first as f64 + half).ceil() as i64 - 1) % len;
        if second <= -1 {
            second = len - 1;
        }
        items.swap(first as usize, second as usize);
        first = second - 1;
        if first <= -1 {
            first = len - 1;
        }
    }
}
