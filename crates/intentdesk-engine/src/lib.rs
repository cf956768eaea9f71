//! Intent registry and matcher for IntentDesk.
//!
//! This crate provides:
//!
//! - **[`registry`]** -- [`Registry`], the immutable, priority-sorted
//!   collection of parsed intents.  [`Registry::build`] is the sole entry
//!   point for turning DSL source text into something matchable.
//! - **[`matcher`]** -- [`match_input`], a pure function that probes the
//!   registry in its fixed order and returns the first matching intent or
//!   the no-match sentinel.
//!
//! A registry never mutates after build, so it can be matched against from
//! any number of threads without coordination.  Reload is build-then-swap:
//! construct a new registry and replace the shared reference.

pub mod matcher;
pub mod registry;

pub use matcher::{MatchOutcome, MatchResult, match_input};
pub use registry::Registry;
