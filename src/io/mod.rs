//! Input boundary
//!
//! Validated chroma features and the JSON request schema.

pub mod features;
pub mod request;
