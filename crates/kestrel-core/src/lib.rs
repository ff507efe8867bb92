//! Kestrel Core
//!
//! Shared utilities for the Kestrel application shell: logging setup,
//! puffin profiling and small geometry types.

pub mod geometry;
pub mod logging;
pub mod profiling;
