use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CLIError {
	ExternalError(String, String),
	NotFound(String),
}

impl fmt::Display for CLIError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
       fmt::Debug::fmt(&self, f)
    }
}

impl From<mlc::RuntimeError> for CLIError {
	fn from(e: mlc::RuntimeError) -> Self {
		CLIError::ExternalError("RuntimeError".into(), e.to_string())
	}
}

impl From<mlc::FileIOError> for CLIError {
	fn from(e: mlc::FileIOError) -> Self {
		CLIError::ExternalError("FileIOError".into(), e.to_string())
	}
}

pub type CLIResult<O=()> = Result<O, CLIError>;
