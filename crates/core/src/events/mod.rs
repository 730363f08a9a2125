//! Events module.
//!
//! Provides the record mutation events that drive report recomputation, and
//! the diagnostics sink through which aggregators report conditions they
//! recovered from.

mod diagnostic;
mod record_event;
mod sink;

pub use diagnostic::*;
pub use record_event::*;
pub use sink::*;
