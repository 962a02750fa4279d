use serde::{Deserialize, Serialize};

/// Position, heading and mode of the actor. Doubles as the key of a graph node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorState {
    pub x: i64,
    pub y: i64,
    pub dx: i8,
    pub dy: i8,
    pub elevator: bool,
    /// Ignore the instruction on the next cell
    pub skip: bool,
}

impl ActorState {
    /// Top-left corner, walking right.
    pub fn initial() -> Self {
        Self {
            x: 0,
            y: 0,
            dx: 1,
            dy: 0,
            elevator: false,
            skip: false,
        }
    }

    pub fn at(x: i64, y: i64) -> Self {
        Self { x, y, ..Self::initial() }
    }
}

impl Default for ActorState {
    fn default() -> Self {
        Self::initial()
    }
}
