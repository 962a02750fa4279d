use std::fmt;
use super::MlcError;
use crate::ActorState;

#[derive(Debug, Clone, PartialEq)]
pub enum FileIOError {
	ExternalError(String, String),
	MalformedHeader(MalformedHeaderError),
	MalformedPayload(String),
	MalformedGraph(MalformedGraphError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MalformedHeaderError {
	GraphDecl,
	GraphEnd,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MalformedGraphError {
	MissingInitial(ActorState),
	DanglingSuccessor(ActorState),
	TooManySuccessors(ActorState),
}

impl fmt::Display for FileIOError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
       fmt::Debug::fmt(&self, f)
    }
}

impl MlcError for FileIOError { }

pub type FileIOResult<O=()> = Result<O, FileIOError>;
