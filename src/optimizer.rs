use std::collections::HashSet;

use tracing::{debug, trace};

use crate::{ActorState, Event, Graph};

/// Merge straight-line chains into single nodes.
///
/// A node is linear when it has one successor and one predecessor. Whenever a linear node's
/// successor is linear as well, the first absorbs the second: it keeps its own key and
/// predecessors, takes over the successors, and appends the events. The program entry counts
/// as a predecessor of the initial state, so the initial state always survives.
pub fn fuse_linear(graph: &Graph) -> Graph {
    let mut fuser = Fuser::new(graph);
    let states = fuser.graph.states().copied().collect::<Vec<_>>();
    for state in states {
        if fuser.absorbed.contains(&state) {
            continue;
        }
        while fuser.absorb(state) {}
    }
    fuser.finish()
}

struct Fuser {
    graph: Graph,
    absorbed: HashSet<ActorState>,
}

impl Fuser {
    fn new(graph: &Graph) -> Self {
        let mut graph = graph.clone();
        graph.fill_in_predecessors();
        Self {
            graph,
            absorbed: HashSet::new(),
        }
    }

    fn is_linear(&self, state: &ActorState) -> bool {
        self.graph.get(state).map_or(false, |node| {
            let entry = usize::from(*state == self.graph.initial);
            node.successors.len() == 1 && node.predecessors.len() + entry == 1
        })
    }

    /// Fold the successor of `state` into it. Returns false when the pair is not fusable.
    fn absorb(&mut self, state: ActorState) -> bool {
        if !self.is_linear(&state) {
            return false;
        }
        let next = self.graph.nodes[&state].successors[0];
        // Self-loops stay as they are
        if next == state || !self.is_linear(&next) {
            return false;
        }

        let absorbed = std::mem::take(&mut self.graph.nodes[&next]);
        let after = absorbed.successors[0];
        let node = &mut self.graph.nodes[&state];
        node.successors = absorbed.successors;
        node.events.extend(absorbed.events);

        let predecessors = &mut self.graph.nodes[&after].predecessors;
        predecessors.remove(&next);
        predecessors.insert(state);

        self.absorbed.insert(next);
        trace!(into = ?state, absorbed = ?next, "fused");
        true
    }

    fn finish(mut self) -> Graph {
        let absorbed = self.absorbed;
        self.graph.nodes.retain(|state, _| !absorbed.contains(state));
        debug!(
            fused = absorbed.len(),
            states = self.graph.len(),
            "fused linear chains"
        );
        self.graph
    }
}

/// Merge adjacent events of the same kind inside every node.
pub fn coalesce_events(graph: &Graph) -> Graph {
    let mut graph = graph.clone();
    let mut before = 0;
    let mut after = 0;
    for node in graph.nodes.values_mut() {
        before += node.events.len();
        node.events = coalesce(&node.events);
        after += node.events.len();
    }
    debug!(before, after, "coalesced events");
    graph
}

/// Run-length encode a list of events, summing the repeats of each run.
pub fn coalesce(events: &[Event]) -> Vec<Event> {
    events.iter().fold(Vec::with_capacity(events.len()), |mut runs: Vec<Event>, event| {
        match runs.last_mut() {
            Some(run) if run.kind == event.kind => run.repeat += event.repeat,
            _ => runs.push(*event),
        }
        runs
    })
}
