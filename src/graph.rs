use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::runtime::*, step, ActorState, Event, Grid, StepOutcome};

/// One reachable actor state and what happens when the actor leaves it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Empty for a terminal node, `[on_false, on_true]` for a branch
    pub successors: Vec<ActorState>,
    pub events: Vec<Event>,
    /// Back-references, filled in by [Graph::fill_in_predecessors]
    #[serde(skip)]
    pub predecessors: BTreeSet<ActorState>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    Terminal,
    Straight(ActorState),
    Branch {
        on_false: ActorState,
        on_true: ActorState,
    },
}

impl GraphNode {
    pub fn new(successors: Vec<ActorState>, events: Vec<Event>) -> Self {
        Self {
            successors,
            events,
            predecessors: BTreeSet::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.successors.as_slice() {
            [] => NodeKind::Terminal,
            [next] => NodeKind::Straight(*next),
            [on_false, on_true] => NodeKind::Branch {
                on_false: *on_false,
                on_true: *on_true,
            },
            _ => unreachable!("graph node with {} successors", self.successors.len()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.successors.is_empty()
    }

    pub fn is_branch(&self) -> bool {
        self.successors.len() == 2
    }
}

/// Counters gathered while exploring a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BuildStats {
    pub states: usize,
    pub end_states: usize,
    /// Calls made to [step]
    pub steps: usize,
}

/// The program as a state machine, nodes kept in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub initial: ActorState,
    pub(crate) nodes: IndexMap<ActorState, GraphNode>,
}

impl Graph {
    pub fn new(initial: ActorState) -> Self {
        Self {
            initial,
            nodes: IndexMap::new(),
        }
    }

    /// Explore every state reachable from [ActorState::initial].
    pub fn build(grid: &Grid) -> RuntimeResult<(Self, BuildStats)> {
        let mut graph = Graph::new(ActorState::initial());
        let mut stats = BuildStats::default();
        let mut undiscovered = vec![graph.initial];

        while let Some(state) = undiscovered.pop() {
            if graph.nodes.contains_key(&state) {
                continue;
            }
            stats.steps += 1;
            let node = match step(grid, &state, None)? {
                StepOutcome::Stepped { next, event } => {
                    GraphNode::new(vec![next], event.into_iter().collect())
                }
                StepOutcome::Ended => GraphNode::new(vec![], vec![]),
                StepOutcome::NeedsDecision => {
                    stats.steps += 2;
                    let on_false = resolve(grid, &state, false)?;
                    let on_true = resolve(grid, &state, true)?;
                    GraphNode::new(vec![on_false, on_true], vec![])
                }
            };
            undiscovered.extend(
                node.successors
                    .iter()
                    .filter(|next| !graph.nodes.contains_key(*next)),
            );
            graph.nodes.insert(state, node);
        }

        stats.states = graph.len();
        stats.end_states = graph.terminal_count();
        debug!(
            states = stats.states,
            end_states = stats.end_states,
            steps = stats.steps,
            "explored grid"
        );
        Ok((graph, stats))
    }

    pub fn insert(&mut self, state: ActorState, node: GraphNode) -> Option<GraphNode> {
        self.nodes.insert(state, node)
    }

    pub fn get(&self, state: &ActorState) -> Option<&GraphNode> {
        self.nodes.get(state)
    }

    pub fn contains(&self, state: &ActorState) -> bool {
        self.nodes.contains_key(state)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ActorState, &GraphNode)> {
        self.nodes.iter()
    }

    pub fn states(&self) -> impl Iterator<Item = &ActorState> {
        self.nodes.keys()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn terminal_count(&self) -> usize {
        self.nodes.values().filter(|node| node.is_terminal()).count()
    }

    /// Recompute every predecessor set from the successor lists.
    pub fn fill_in_predecessors(&mut self) {
        for node in self.nodes.values_mut() {
            node.predecessors.clear();
        }
        let edges = self
            .nodes
            .iter()
            .flat_map(|(state, node)| node.successors.iter().map(move |next| (*state, *next)))
            .collect::<Vec<_>>();
        for (state, next) in edges {
            if let Some(node) = self.nodes.get_mut(&next) {
                node.predecessors.insert(state);
            }
        }
    }
}

fn resolve(grid: &Grid, state: &ActorState, decision: bool) -> RuntimeResult<ActorState> {
    match step(grid, state, Some(decision))? {
        StepOutcome::Stepped { next, .. } => Ok(next),
        outcome => unreachable!("branch at {:?} resolved to {:?}", state, outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreeset;

    #[test]
    fn corridor_has_a_node_per_cell() {
        let grid = Grid::parse("  .\n=====");
        let (graph, stats) = Graph::build(&grid).unwrap();
        // Five cells on the corridor, one after falling off, one past the last row
        assert_eq!(graph.len(), 8);
        assert_eq!(stats.states, 8);
        assert_eq!(stats.end_states, 1);
        assert_eq!(stats.steps, 8);
        assert_eq!(
            graph.get(&ActorState::at(2, 0)).unwrap().events,
            vec![Event::new(crate::EventKind::OutputChar)]
        );
        assert!(graph.get(&ActorState::at(5, 2)).unwrap().is_terminal());
    }

    #[test]
    fn branch_successors_are_false_then_true() {
        let grid = Grid::parse("+[+:\n====");
        let (graph, stats) = Graph::build(&grid).unwrap();
        let node = graph.get(&ActorState::at(1, 0)).unwrap();
        assert_eq!(
            node.kind(),
            NodeKind::Branch {
                on_false: ActorState::at(2, 0),
                on_true: ActorState { skip: true, ..ActorState::at(2, 0) },
            }
        );
        assert!(node.events.is_empty());
        assert_eq!(graph.iter().filter(|(_, node)| node.is_branch()).count(), 1);
        // Both arms share the fall at the end
        assert_eq!(stats.end_states, 1);
    }

    #[test]
    fn builder_leaves_predecessors_empty() {
        let grid = Grid::parse("+[+:\n====");
        let (mut graph, _) = Graph::build(&grid).unwrap();
        assert!(graph.iter().all(|(_, node)| node.predecessors.is_empty()));

        graph.fill_in_predecessors();
        assert_eq!(
            graph.get(&ActorState::at(3, 0)).unwrap().predecessors,
            btreeset! {
                ActorState::at(2, 0),
                ActorState { skip: true, ..ActorState::at(2, 0) },
            }
        );
        assert!(graph.get(&graph.initial).unwrap().predecessors.is_empty());
    }

    #[test]
    fn stuck_actor_loops_on_itself() {
        let grid = Grid::parse("!\n=");
        let (graph, stats) = Graph::build(&grid).unwrap();
        let halted = ActorState { dx: 0, ..ActorState::initial() };
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.get(&halted).unwrap().successors, vec![halted]);
        assert_eq!(stats.end_states, 0);
    }

    #[test]
    fn climbing_out_is_fatal() {
        let grid = Grid::parse("^\n=");
        assert_eq!(
            Graph::build(&grid).map(|(graph, _)| graph.len()),
            Err(RuntimeError::OutOfBounds { x: 0, y: -1 })
        );
    }
}
