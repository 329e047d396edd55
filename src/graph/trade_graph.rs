use crate::core::ids::ParticipantId;
use crate::core::participant::Participant;
use crate::error::TradeLoopError;
use crate::graph::constraint::admissible;
use petgraph::graphmap::DiGraphMap;
use std::collections::HashMap;

/// A directed graph over a period's active participants, with an edge
/// `i -> j` wherever [`admissible`] holds.
///
/// Backed by [`petgraph::graphmap::DiGraphMap`] keyed on dense `u32`
/// indices, giving amortized O(1) successor iteration and O(1) edge
/// membership tests — well within the O(log deg) bound this graph's
/// contract requires.
#[derive(Debug, Clone)]
pub struct TradeGraph {
    graph: DiGraphMap<u32, ()>,
    index_of: HashMap<ParticipantId, u32>,
    id_of: Vec<ParticipantId>,
}

impl TradeGraph {
    /// Build the graph from a period's active participants.
    ///
    /// Evaluates the four-clause [`admissible`] predicate over every
    /// ordered pair. This is the one place in the engine that is
    /// inherently Θ(N²) in the number of candidate pairs — no index
    /// structure avoids testing pairs that might or might not satisfy
    /// arbitrary floor/top-up constraints — but edge storage and all
    /// downstream traversal are O(|E| + N).
    ///
    /// # Errors
    ///
    /// Returns [`TradeLoopError::DuplicateParticipantId`] if two
    /// participants share an id, or propagates
    /// [`TradeLoopError::InvalidParticipant`] from the constraint filter.
    pub fn build(participants: &[Participant]) -> Result<Self, TradeLoopError> {
        let mut index_of = HashMap::with_capacity(participants.len());
        let mut id_of = Vec::with_capacity(participants.len());
        let mut graph = DiGraphMap::new();

        for p in participants {
            if index_of.contains_key(p.participant_id()) {
                return Err(TradeLoopError::DuplicateParticipantId(
                    p.participant_id().clone(),
                ));
            }
            let idx = id_of.len() as u32;
            index_of.insert(p.participant_id().clone(), idx);
            id_of.push(p.participant_id().clone());
            graph.add_node(idx);
        }

        for (i, pi) in participants.iter().enumerate() {
            for (j, pj) in participants.iter().enumerate() {
                if i == j {
                    continue;
                }
                if admissible(pi, pj)? {
                    graph.add_edge(i as u32, j as u32, ());
                }
            }
        }

        Ok(Self {
            graph,
            index_of,
            id_of,
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn index(&self, id: &ParticipantId) -> Option<u32> {
        self.index_of.get(id).copied()
    }

    fn id(&self, idx: u32) -> &ParticipantId {
        &self.id_of[idx as usize]
    }

    /// Successors of `id`, i.e. participants `id`'s item could legally flow to.
    pub fn successors(&self, id: &ParticipantId) -> Vec<ParticipantId> {
        match self.index(id) {
            Some(idx) => self
                .graph
                .neighbors_directed(idx, petgraph::Direction::Outgoing)
                .map(|n| self.id(n).clone())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether the edge `from -> to` exists.
    pub fn has_edge(&self, from: &ParticipantId, to: &ParticipantId) -> bool {
        match (self.index(from), self.index(to)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// All active participant ids, in admission order.
    pub fn participant_ids(&self) -> &[ParticipantId] {
        &self.id_of
    }
}
