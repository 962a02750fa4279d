use std::fmt;

pub mod fileio;
pub mod runtime;

/// Marker for every error the library reports.
pub trait MlcError: fmt::Debug + fmt::Display {}
