// FILE: src/core/mod.rs
pub mod canonical;
pub mod matcher;

pub use matcher::{MatchError, MatchOutcome};
