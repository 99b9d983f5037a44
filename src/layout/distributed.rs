use super::*;
use std::f64::consts::PI;

/// Progress of the last `calculate()` pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Uninitialized,
    RankComputed,
    HubPlaced,
    NeighborsPlaced,
    FullyPlaced,
}

/// Puts the best-connected node (the hub) at the center point, its
/// neighbors on a ring around it, and fans every further node out in an arc
/// facing away from the node that placed it.
#[derive(Debug, Clone)]
pub struct DistributedLayout {
    config: DistributedConfig,
    transform: Transform,
    stage: Stage,
    placed: HashSet<NodeId>,
    placed_order: Vec<NodeId>,
    hubs: Vec<NodeId>,
    neighborhood: Neighborhood,
}

/// Slots on an arc of `span` radians centered on `facing`.
#[derive(Debug, Clone, Copy)]
struct ArcFan {
    center: Point,
    radius: i32,
    start: f64,
    step: f64,
}

/// A node whose fan is partly placed; `cursor` is the next slot.
#[derive(Debug)]
struct FanFrame {
    node: NodeId,
    neighbors: Vec<NodeId>,
    fan: ArcFan,
    cursor: usize,
}

impl ArcFan {
    fn slot(&self, i: usize) -> Point {
        self.center.polar_offset(self.radius, self.start - self.step * (i + 1) as f64)
    }
}

impl DistributedLayout {
    pub fn new(config: DistributedConfig) -> Self {
        Self {
            config,
            transform: Transform::new(),
            stage: Stage::Uninitialized,
            placed: HashSet::new(),
            placed_order: Vec::new(),
            hubs: Vec::new(),
            neighborhood: Neighborhood::default(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Hub of each laid out component; the first one is the global hub.
    pub fn hubs(&self) -> &[NodeId] {
        &self.hubs
    }

    pub fn is_placed(&self, id: NodeId) -> bool {
        self.placed.contains(&id)
    }

    fn ring_radius(&self, count: usize) -> i32 {
        let base = self.config.min_radius + count as i32 * self.config.radius_per_node;
        (base as f64 * self.config.circle_radius_factor) as i32
    }

    fn arc_radius(&self, count: usize) -> i32 {
        self.config.min_radius + count as i32 * self.config.radius_per_node
    }

    fn mark(&mut self, id: NodeId) {
        if self.placed.insert(id) {
            self.placed_order.push(id);
        }
    }

    fn unplaced_neighbors(&self, graph: &Graph, id: NodeId) -> Vec<NodeId> {
        let mut neighbors = self.neighborhood.connected(graph, id);
        neighbors.retain(|n| !self.placed.contains(n));
        neighbors
    }

    fn arc_fan(&self, graph: &Graph, node: NodeId, parent: NodeId, count: usize) -> ArcFan {
        let center = graph.position(node);
        let facing = graph.position(parent).angle_to(center);
        let span = self.config.arc_degrees.to_radians();
        ArcFan {
            center,
            radius: self.arc_radius(count),
            start: facing + span / 2.0,
            step: span / (count + 1) as f64,
        }
    }

    /// Places `hub` at `at`, its neighbors around it, and everything
    /// reachable from them. Returns the ring.
    fn place_component(&mut self, graph: &mut Graph, hub: NodeId, at: Point) -> Vec<NodeId> {
        graph.set_position(hub, at);
        self.mark(hub);
        self.hubs.push(hub);
        if self.hubs.len() == 1 {
            self.stage = Stage::HubPlaced;
        }

        let ring = self.place_ring(graph, hub);
        if self.hubs.len() == 1 {
            self.stage = Stage::NeighborsPlaced;
        }

        match self.config.traversal {
            ArcTraversal::DepthFirst => {
                for &node in &ring {
                    self.fan_out_depth_first(graph, node, hub);
                }
            }
            ArcTraversal::LevelOrder => self.fan_out_level_order(graph, &ring, hub),
        }
        ring
    }

    fn place_ring(&mut self, graph: &mut Graph, hub: NodeId) -> Vec<NodeId> {
        let ring = self.unplaced_neighbors(graph, hub);
        if ring.is_empty() {
            return ring;
        }
        let radius = self.ring_radius(ring.len());
        let step = 2.0 * PI / ring.len() as f64;
        let center = graph.position(hub);
        for (i, &id) in ring.iter().enumerate() {
            graph.set_position(id, center.polar_offset(radius, step * i as f64));
            self.mark(id);
        }
        ring
    }

    // Each frame takes its neighbor list once, before any of its members is
    // descended into. A member claimed further down is placed again when the
    // frame resumes.
    fn fan_out_depth_first(&mut self, graph: &mut Graph, start: NodeId, parent: NodeId) {
        let mut stack: Vec<FanFrame> = Vec::new();
        stack.extend(self.fan_frame(graph, start, parent));
        while let Some(frame) = stack.last_mut() {
            let Some(&next) = frame.neighbors.get(frame.cursor) else {
                stack.pop();
                continue;
            };
            let slot = frame.fan.slot(frame.cursor);
            let node = frame.node;
            frame.cursor += 1;

            graph.set_position(next, slot);
            self.mark(next);
            stack.extend(self.fan_frame(graph, next, node));
        }
    }

    fn fan_frame(&self, graph: &Graph, node: NodeId, parent: NodeId) -> Option<FanFrame> {
        let neighbors = self.unplaced_neighbors(graph, node);
        if neighbors.is_empty() {
            return None;
        }
        let fan = self.arc_fan(graph, node, parent, neighbors.len());
        Some(FanFrame {
            node,
            neighbors,
            fan,
            cursor: 0,
        })
    }

    fn fan_out_level_order(&mut self, graph: &mut Graph, ring: &[NodeId], hub: NodeId) {
        let mut queue: VecDeque<(NodeId, NodeId)> = ring.iter().map(|&id| (id, hub)).collect();
        while let Some((node, parent)) = queue.pop_front() {
            let neighbors = self.unplaced_neighbors(graph, node);
            if neighbors.is_empty() {
                continue;
            }
            let fan = self.arc_fan(graph, node, parent, neighbors.len());
            for (i, &next) in neighbors.iter().enumerate() {
                graph.set_position(next, fan.slot(i));
                self.mark(next);
                queue.push_back((next, node));
            }
        }
    }

    /// Lays out each component the hub could not reach, right of everything
    /// placed so far and level with the first hub.
    fn place_disconnected(&mut self, graph: &mut Graph, rank: &ConnectivityRank) {
        let anchor_y = match self.hubs.first() {
            Some(&hub) => graph.position(hub).y,
            None => return,
        };
        loop {
            let Some(next) = rank.top_where(|id| !self.placed.contains(&id)) else {
                break;
            };
            let Some(before) = Bounds::of(self.placed_order.iter().map(|&id| graph.position(id)))
            else {
                break;
            };
            let start = self.placed_order.len();
            self.place_component(graph, next, Point::ORIGIN);
            let members = self.placed_order[start..].to_vec();
            let Some(component) = Bounds::of(members.iter().map(|&id| graph.position(id))) else {
                continue;
            };
            let shift = Point::new(
                before.max.x + 2 * self.config.width_margin - component.min.x,
                anchor_y - component.center().y,
            );
            for id in members {
                graph.set_position(id, graph.position(id) + shift);
            }
        }
    }

    /// Takes the padded extents of every node as the new size, and their
    /// middle as the new center point. Positions are left where they are.
    fn recompute_bounds(&mut self, graph: &Graph) {
        let Some(bounds) = Bounds::of(graph.nodes().iter().map(|node| node.position())) else {
            self.transform.set_current_size(Size::ZERO);
            return;
        };
        let padded = bounds.padded(self.config.width_margin, self.config.height_margin);
        self.transform.set_current_size(padded.size());
        self.transform.set_center_point(padded.center());
    }
}

impl Default for DistributedLayout {
    fn default() -> Self {
        Self::new(DistributedConfig::default())
    }
}

impl PositionCalc for DistributedLayout {
    fn calculate(&mut self, graph: &mut Graph) -> Result<(), LayoutError> {
        graph.validate()?;
        self.stage = Stage::Uninitialized;
        self.placed.clear();
        self.placed_order.clear();
        self.hubs.clear();
        self.neighborhood = Neighborhood::build(graph);

        let rank = ConnectivityRank::compute(graph);
        self.stage = Stage::RankComputed;
        let Some(hub) = rank.top() else {
            self.transform.set_current_size(Size::ZERO);
            self.stage = Stage::FullyPlaced;
            return Ok(());
        };

        let center = self.transform.center_point();
        self.place_component(graph, hub, center);
        if self.config.place_disconnected {
            self.place_disconnected(graph, &rank);
        }
        log::debug!(
            "distributed layout: hub '{}' (score {}), {} of {} nodes placed in {} component(s)",
            graph.node(hub).name,
            rank.score(hub),
            self.placed.len(),
            graph.len(),
            self.hubs.len()
        );

        self.recompute_bounds(graph);
        self.stage = Stage::FullyPlaced;
        Ok(())
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}
