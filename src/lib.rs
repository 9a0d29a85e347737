//! skillroute - skill and agent routing engine
//!
//! Decides, for one natural-language request, which installed skill domains
//! may handle it and which downstream agent should take it. Explicit lexical
//! mentions, long-term preference memory and an optional model classifier
//! are merged into one bounded, auditable decision.

pub mod agents;
pub mod catalog;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod logging;
pub mod routing;
