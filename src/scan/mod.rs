//! Batch scanning: symbol validation, strategy evaluation, reporting
//!
//! The scanner owns the run loop described in the crate docs: validate
//! each symbol once, evaluate each requested strategy on a fresh frame,
//! isolate per-pair failures, and collect fired entry signals plus run
//! diagnostics into a [`ScanReport`].

pub mod engine;
pub mod report;
pub mod validate;

pub use engine::*;
pub use report::*;
pub use validate::*;
