use std::fmt;

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Grid symbols of the memory/IO instructions, in [EventKind] order.
pub const EVENT_SYMBOLS: &str = ")(+-.:,;";

/*
    P   : memory pointer
    M(P): memory cell under the pointer
    n   : repeat count of the event
*/
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive, Serialize, Deserialize)]
pub enum EventKind {
    Forward,    // 0  )  P += n
    Back,       // 1  (  P -= n, fatal below zero
    Increment,  // 2  +  M(P) += n
    Decrement,  // 3  -  M(P) -= n
    OutputChar, // 4  .  write M(P) as a byte, n times
    OutputInt,  // 5  :  write M(P) as decimal and a space, n times
    InputChar,  // 6  ,  M(P) = next input byte, n times
    InputInt,   // 7  ;  M(P) = next input integer, n times
}

impl EventKind {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        EVENT_SYMBOLS.find(symbol).and_then(Self::from_usize)
    }

    pub fn symbol(self) -> char {
        EVENT_SYMBOLS.as_bytes()[self as usize] as char
    }
}

/// A memory/IO operation performed `repeat` times in a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub repeat: u32,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self { kind, repeat: 1 }
    }

    pub fn repeated(kind: EventKind, repeat: u32) -> Self {
        Self { kind, repeat }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.repeat, self.kind.symbol())
    }
}

#[test]
fn symbols_round_trip() {
    for (idx, symbol) in EVENT_SYMBOLS.chars().enumerate() {
        let kind = EventKind::from_symbol(symbol).unwrap();
        assert_eq!(kind as usize, idx);
        assert_eq!(kind.symbol(), symbol);
    }
    assert_eq!(EventKind::from_symbol('='), None);
    assert_eq!(Event::repeated(EventKind::Increment, 3).to_string(), "3+");
}
