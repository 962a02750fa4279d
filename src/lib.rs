mod compiler;
pub mod dot;
pub mod error;
mod event;
pub mod fileio;
mod graph;
mod grid;
mod optimizer;
mod runtime;
mod scanner;
mod state;
mod step;

pub use compiler::Compiler;
pub use error::{fileio::*, runtime::*, MlcError};
pub use event::{Event, EventKind, EVENT_SYMBOLS};
pub use graph::{BuildStats, Graph, GraphNode, NodeKind};
pub use grid::{Cell, Grid};
pub use optimizer::{coalesce, coalesce_events, fuse_linear};
pub use runtime::{Memory, Runtime};
pub use scanner::TokenKind;
pub use state::ActorState;
pub use step::{step, StepOutcome};

use tracing::info;

pub const MLC_VER: &str = env!("CARGO_PKG_VERSION");

/// Knobs for the compilation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub fuse: bool,
    pub coalesce: bool,
    /// Cells in the generated program's tape
    pub tape_len: usize,
    /// Events shown per node in the diagram
    pub label_events: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fuse: true,
            coalesce: true,
            tape_len: 1024,
            label_events: 30,
        }
    }
}

/// Everything produced from one grid.
#[derive(Debug, Clone)]
pub struct Compilation {
    /// Exploration counters of the unoptimized graph
    pub stats: BuildStats,
    pub graph: Graph,
    pub program: String,
    pub diagram: String,
}

/// Run the enabled optimizer passes over `graph`.
pub fn optimize(graph: &Graph, options: &Options) -> Graph {
    let graph = if options.fuse {
        fuse_linear(graph)
    } else {
        graph.clone()
    };
    if options.coalesce {
        coalesce_events(&graph)
    } else {
        graph
    }
}

/// Explore, optimize and lower a grid program to C and a dot diagram.
pub fn compile(source: &str, options: &Options) -> RuntimeResult<Compilation> {
    let grid = Grid::parse(source);
    let (raw, stats) = Graph::build(&grid)?;
    let graph = optimize(&raw, options);
    info!(
        states = stats.states,
        end_states = stats.end_states,
        surviving = graph.len(),
        steps = stats.steps,
        "compiled"
    );
    Ok(Compilation {
        stats,
        program: Compiler::new(&graph, options).compile(),
        diagram: dot::render(&graph, options.label_events),
        graph,
    })
}
