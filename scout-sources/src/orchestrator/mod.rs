//! Aggregation: concurrent source fan-out and name-keyed merge.
//!
//! This module queries every source concurrently, merges records that share
//! a business name in source priority order, and truncates the result.

pub mod aggregate;
pub mod merge;
