//! Exclusion sets for analysis tools.
//!
//! An exclusion config maps glob patterns to the reason a file is skipped:
//! - Load (config bytes -> validated, absolute patterns)
//! - Query (does a path match any configured pattern?)
//!
//! Walking directories and deciding when to ask is left to the caller.

pub mod config;
pub mod core;
pub mod error;
pub mod exclusion_set;

pub use config::LoadOptions;
pub use crate::core::{MatchError, MatchOutcome};
pub use error::{ExclusionError, Result};
pub use exclusion_set::{Exclusion, ExclusionSet};
