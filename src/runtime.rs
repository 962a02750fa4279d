/*
    # Reference Interpreter
    Runs a program against a live memory tape, either straight from the grid (stepping the actor
    one cell at a time) or by walking a state graph. Both modes apply events the same way, so any
    graph produced by the optimizer can be checked against the grid it came from.

    ## Branches
    A `[` is decided on demand: the step function is asked first without a decision and, when it
    needs one, asked again with "the cell under the pointer is zero". In a graph the same decision
    picks successor 1, otherwise successor 0.
*/

use std::io::{BufRead, Write};

use tracing::debug;

use crate::{
    error::runtime::*, step, ActorState, Event, EventKind, Graph, Grid, NodeKind, StepOutcome,
};

mod memory;
pub use memory::*;

pub struct Runtime<R, W> {
    pub memory: Memory,
    /// Steps taken in grid mode, nodes visited in graph mode
    pub steps: usize,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Runtime<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            memory: Memory::new(),
            steps: 0,
            input,
            output,
        }
    }

    /// Run the grid directly until the actor falls off the last row.
    pub fn exec_grid(&mut self, grid: &Grid) -> RuntimeResult {
        let mut state = ActorState::initial();
        loop {
            self.steps += 1;
            let outcome = match step(grid, &state, None)? {
                StepOutcome::NeedsDecision => step(grid, &state, Some(self.memory.is_zero()))?,
                outcome => outcome,
            };
            match outcome {
                StepOutcome::Stepped { next, event } => {
                    if let Some(event) = event {
                        self.apply(&event)?;
                    }
                    state = next;
                }
                StepOutcome::Ended => break,
                StepOutcome::NeedsDecision => unreachable!("branch decision was supplied"),
            }
        }
        debug!(steps = self.steps, "grid finished");
        self.output.flush()?;
        Ok(())
    }

    /// Run a state graph from its initial state until a terminal node.
    pub fn exec_graph(&mut self, graph: &Graph) -> RuntimeResult {
        let mut state = graph.initial;
        loop {
            let node = graph.get(&state).ok_or(RuntimeError::UnknownState(state))?;
            self.steps += 1;
            let next = match node.kind() {
                NodeKind::Terminal => break,
                NodeKind::Straight(next) => next,
                NodeKind::Branch { on_false, on_true } => {
                    if self.memory.is_zero() {
                        on_true
                    } else {
                        on_false
                    }
                }
            };
            for event in &node.events {
                self.apply(event)?;
            }
            state = next;
        }
        debug!(steps = self.steps, "graph finished");
        self.output.flush()?;
        Ok(())
    }

    pub fn apply(&mut self, event: &Event) -> RuntimeResult {
        let n = event.repeat;
        match event.kind {
            EventKind::Forward => self.memory.forward(n),
            EventKind::Back => self.memory.back(n)?,
            EventKind::Increment => self.memory.add(n as i64),
            EventKind::Decrement => self.memory.add(-(n as i64)),
            EventKind::OutputChar => {
                for _ in 0..n {
                    // Written as a single byte, like putchar
                    self.output.write_all(&[self.memory.get() as u8])?;
                }
            }
            EventKind::OutputInt => {
                for _ in 0..n {
                    write!(self.output, "{} ", self.memory.get())?;
                }
            }
            EventKind::InputChar => {
                for _ in 0..n {
                    let value = self.read_byte()?.map_or(-1, i64::from);
                    self.memory.set(value);
                }
            }
            EventKind::InputInt => {
                for _ in 0..n {
                    let value = self.read_int()?;
                    self.memory.set(value);
                }
            }
        }
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn peek_byte(&mut self) -> RuntimeResult<Option<u8>> {
        Ok(self.input.fill_buf()?.first().copied())
    }

    fn read_byte(&mut self) -> RuntimeResult<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.input.consume(1);
        }
        Ok(byte)
    }

    /// Skip whitespace, then read an optionally signed decimal integer.
    fn read_int(&mut self) -> RuntimeResult<i64> {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek_byte()? {
            self.input.consume(1);
        }
        let mut digits = String::new();
        if let Some(sign @ (b'-' | b'+')) = self.peek_byte()? {
            digits.push(sign as char);
            self.input.consume(1);
        }
        while let Some(digit) = self.peek_byte()?.filter(u8::is_ascii_digit) {
            digits.push(digit as char);
            self.input.consume(1);
        }
        if digits.is_empty() && self.peek_byte()?.is_none() {
            return Err(InputError::UnexpectedEof.into());
        }
        digits
            .parse::<i64>()
            .map_err(|_| InputError::NotAnInteger(digits).into())
    }
}
