//! This is the documentation for dateseq
//!
//! Steerable date cursors, lazily cached holiday calendars and k-way union/intersection
//! merging of date sequences. See the [`scheduling`] module for an overview.

#[cfg(test)]
mod tests;

pub mod error;
pub use error::{Error, Result};

pub mod json;

pub mod scheduling;
