//! # Workflows Module
//!
//! Top-level entry points of the library.
//!
//! - **Validation Workflow** ([`validate`]) - Clash detection, bond length
//!   correction, and both run in sequence with a caller-supplied configuration.

pub mod validate;
