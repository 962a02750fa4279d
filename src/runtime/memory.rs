use crate::error::runtime::*;

/// Tape of integer cells with a movable pointer. Grows to the right on demand.
#[derive(Clone, Debug, PartialEq)]
pub struct Memory {
    pub cells: Vec<i64>,
    pub pointer: usize,
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            cells: vec![0],
            pointer: 0,
        }
    }
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forward(&mut self, by: u32) {
        self.pointer += by as usize;
        if self.pointer >= self.cells.len() {
            self.cells.resize(self.pointer + 1, 0);
        }
    }

    pub fn back(&mut self, by: u32) -> RuntimeResult {
        self.pointer = self
            .pointer
            .checked_sub(by as usize)
            .ok_or(RuntimeError::PointerUnderflow {
                pointer: self.pointer,
                by,
            })?;
        Ok(())
    }

    pub fn get(&self) -> i64 {
        self.cells[self.pointer]
    }

    pub fn set(&mut self, value: i64) {
        self.cells[self.pointer] = value;
    }

    pub fn add(&mut self, delta: i64) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_add(delta);
    }

    /// The branch decision of `[`.
    pub fn is_zero(&self) -> bool {
        self.get() == 0
    }
}
