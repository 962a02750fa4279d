/*
    # Step Semantics
    One step reads the cell under the actor, applies its instruction (unless the skip flag is
    set), then moves the actor by exactly one rule:

    1. standing on `>`, `<` or `@`: walk sideways
    2. moving vertically: take one vertical step (and keep going while in elevator mode)
    3. otherwise look below: slide along platforms and pillars, fall through anything else

    Only `[` depends on memory, and the caller decides it. Every other transition is a pure
    function of the grid and the actor state, which is what lets the graph builder enumerate
    the whole program ahead of time.
*/

use crate::{error::runtime::*, ActorState, Cell, Event, Grid};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Stepped {
        next: ActorState,
        event: Option<Event>,
    },
    /// The actor fell past the last row
    Ended,
    /// The actor stands on `[` and no branch decision was supplied
    NeedsDecision,
}

/// Advance `state` by one step.
///
/// `decision` is only consulted on `[` cells, where `true` means "the memory cell under the
/// pointer is zero" and skips the next instruction.
pub fn step(grid: &Grid, state: &ActorState, decision: Option<bool>) -> RuntimeResult<StepOutcome> {
    let mut ms = *state;
    let mut event = None;
    let mut just_branched = false;

    if ms.y < 0 {
        return Err(RuntimeError::OutOfBounds { x: ms.x, y: ms.y });
    }
    if ms.y > grid.max_row() {
        return Ok(StepOutcome::Ended);
    }

    let cell = grid.get(ms.y, ms.x);
    if !ms.skip {
        match cell {
            Cell::Quote => {
                ms.dy = -1;
                ms.elevator = false;
            }
            Cell::Memory(kind) => event = Some(Event::new(kind)),
            Cell::Right => ms.dx = 1,
            Cell::Left => ms.dx = -1,
            Cell::Up => ms.dy = -1,
            Cell::Stop => {
                ms.dx = 0;
                ms.dy = 0;
            }
            Cell::Branch => match decision {
                None => return Ok(StepOutcome::NeedsDecision),
                Some(true) => {
                    ms.skip = true;
                    just_branched = true;
                }
                Some(false) => {}
            },
            Cell::Reverse => ms.dx = -ms.dx,
            _ => {}
        }
    }

    if cell.is_walker() && !ms.skip {
        ms.elevator = false;
        ms.dy = 0;
        ms.x += ms.dx as i64;
    } else if ms.dy != 0 {
        ms.y += ms.dy as i64;
        if !ms.elevator {
            ms.dy = 0;
        }
    } else {
        let below = grid.get(ms.y + 1, ms.x);
        if below.is_platform() {
            ms.x += ms.dx as i64;
        } else if below == Cell::Pillar {
            ms.x += ms.dx as i64;
            if cell == Cell::Stop && !ms.skip {
                ms.elevator = true;
                ms.dy = elevator_direction(grid, ms.x, ms.y);
                if ms.dy == 0 {
                    return Err(RuntimeError::NoElevatorTarget { x: ms.x, y: ms.y });
                }
                ms.y += ms.dy as i64;
            }
        } else {
            ms.y += 1;
        }
    }

    if ms.skip && !just_branched {
        ms.skip = false;
    }

    trace!(from = ?state, to = ?ms, ?event, "step");
    Ok(StepOutcome::Stepped { next: ms, event })
}

/// Up when a quote sits anywhere above in the same column, down otherwise.
fn elevator_direction(grid: &Grid, x: i64, y: i64) -> i8 {
    if (0..y).rev().any(|row| grid.get(row, x) == Cell::Quote) {
        -1
    } else {
        1
    }
}
