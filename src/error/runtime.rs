use std::{fmt, io};
use super::MlcError;
use crate::ActorState;

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    ExternalError(String, String),
    /// The actor climbed above the first row
    OutOfBounds { x: i64, y: i64 },
    PointerUnderflow { pointer: usize, by: u32 },
    /// An elevator started without a direction to travel in
    NoElevatorTarget { x: i64, y: i64 },
    Input(InputError),
    UnknownState(ActorState),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    UnexpectedEof,
    NotAnInteger(String),
}

impl MlcError for RuntimeError {}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self, f)
    }
}

impl From<io::Error> for RuntimeError {
    fn from(e: io::Error) -> Self {
        RuntimeError::ExternalError("io::Error".into(), e.to_string())
    }
}

impl From<InputError> for RuntimeError {
    fn from(e: InputError) -> Self {
        RuntimeError::Input(e)
    }
}

pub type RuntimeResult<T = ()> = Result<T, RuntimeError>;
