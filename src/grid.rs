use std::collections::HashMap;

use logos::Logos;

use crate::{EventKind, TokenKind};

/// What the actor finds at a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Blank,
    Platform,
    Quote,
    Pillar,
    Right,
    Left,
    Up,
    Reverse,
    Stop,
    Branch,
    Memory(EventKind),
    Other(char),
}

impl Cell {
    /// Cells the actor can stand on.
    pub fn is_platform(self) -> bool {
        matches!(self, Cell::Platform | Cell::Quote)
    }

    /// `>`, `<` and `@` push the actor sideways on the step they are read.
    pub fn is_walker(self) -> bool {
        matches!(self, Cell::Right | Cell::Left | Cell::Reverse)
    }

    fn from_token(token: TokenKind, slice: &str) -> Vec<Cell> {
        let cell = match token {
            TokenKind::Platform => Cell::Platform,
            TokenKind::Quote => Cell::Quote,
            TokenKind::Pillar => Cell::Pillar,
            TokenKind::Right => Cell::Right,
            TokenKind::Left => Cell::Left,
            TokenKind::Up => Cell::Up,
            TokenKind::Reverse => Cell::Reverse,
            TokenKind::Stop => Cell::Stop,
            TokenKind::Branch => Cell::Branch,
            TokenKind::Memory(kind) => Cell::Memory(kind),
            TokenKind::Other => return slice.chars().map(Cell::Other).collect(),
        };
        vec![cell]
    }
}

/// Sparse program grid indexed by (row, column).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    cells: HashMap<(i64, i64), Cell>,
    max_row: i64,
}

impl Grid {
    pub fn parse(source: &str) -> Self {
        let mut grid = Grid::default();
        for (row, line) in source.lines().enumerate() {
            let row = row as i64;
            // Columns count characters, spans count bytes
            let (mut byte, mut column) = (0usize, 0i64);
            let mut lexer = TokenKind::lexer(line);
            while let Some(token) = lexer.next() {
                let span = lexer.span();
                column += line[byte..span.start].chars().count() as i64;
                for cell in Cell::from_token(token, lexer.slice()) {
                    grid.cells.insert((row, column), cell);
                    grid.max_row = grid.max_row.max(row);
                    column += 1;
                }
                byte = span.end;
            }
        }
        grid
    }

    /// The cell at `(row, column)`, blank when nothing is stored there.
    pub fn get(&self, row: i64, column: i64) -> Cell {
        self.cells.get(&(row, column)).copied().unwrap_or(Cell::Blank)
    }

    /// Index of the last row holding a cell. Falling past it ends the program.
    pub fn max_row(&self) -> i64 {
        self.max_row
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
