//! Analysis and result aggregation modules
//!
//! Turns chord segments into the final chart:
//! - Minimum-duration filtering and fallback
//! - Event formatting
//! - Result types
//! - Metadata

pub mod duration_filter;
pub mod formatter;
pub mod metadata;
pub mod result;
