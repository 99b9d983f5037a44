use super::*;

/// Connection count per node: its own children plus every node that lists
/// it as a child. Indexed by `NodeId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityRank {
    scores: Vec<usize>,
}

impl ConnectivityRank {
    pub fn compute(graph: &Graph) -> Self {
        let mut scores = vec![0usize; graph.len()];
        for node in graph.nodes() {
            scores[node.id.0] += node.child_count();
            for child in node.child_ids() {
                if let Some(score) = scores.get_mut(child.0) {
                    *score += 1;
                }
            }
        }
        Self { scores }
    }

    pub fn score(&self, id: NodeId) -> usize {
        self.scores.get(id.0).copied().unwrap_or(0)
    }

    /// Highest score; ties go to the node created first.
    pub fn top(&self) -> Option<NodeId> {
        self.top_where(|_| true)
    }

    /// Highest score among nodes accepted by `filter`, ties to the node created first.
    pub fn top_where(&self, filter: impl Fn(NodeId) -> bool) -> Option<NodeId> {
        let mut best: Option<(NodeId, usize)> = None;
        for (idx, &score) in self.scores.iter().enumerate() {
            let id = NodeId(idx);
            if !filter(id) {
                continue;
            }
            match best {
                Some((_, best_score)) if best_score >= score => {}
                _ => best = Some((id, score)),
            }
        }
        best.map(|(id, _)| id)
    }
}

/// Reverse child links, built once per layout pass.
#[derive(Debug, Clone, Default)]
pub(super) struct Neighborhood {
    parents: Vec<Vec<NodeId>>,
}

impl Neighborhood {
    pub(super) fn build(graph: &Graph) -> Self {
        let mut parents = vec![Vec::new(); graph.len()];
        for node in graph.nodes() {
            for child in node.child_ids() {
                if let Some(list) = parents.get_mut(child.0) {
                    list.push(node.id);
                }
            }
        }
        Self { parents }
    }

    /// Undirected neighborhood of `id`: its children in insertion order, then
    /// every node listing it as a child, in node-set order. Each neighbor
    /// appears once and `id` itself never does.
    pub(super) fn connected(&self, graph: &Graph, id: NodeId) -> Vec<NodeId> {
        let mut seen: HashSet<NodeId> = HashSet::new();
        seen.insert(id);
        let parents = self.parents.get(id.0).map(Vec::as_slice).unwrap_or(&[]);
        graph
            .node(id)
            .child_ids()
            .iter()
            .chain(parents)
            .copied()
            .filter(|n| seen.insert(*n))
            .collect()
    }
}
