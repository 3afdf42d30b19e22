//! # Engine Module
//!
//! The analysis layer: steric clash detection and bond length correction over a
//! [`MolecularSystem`](crate::core::models::system::MolecularSystem).
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Clash and bond settings, TOML loading and validation
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Reports** ([`report`]) - Findings, violations and corrections returned to the caller
//! - **Error Handling** ([`error`]) - Fatal engine errors and recorded per-residue issues
//!
//! Malformed residues never abort an analysis. They are skipped, logged and
//! returned as [`ResidueIssue`](error::ResidueIssue)s next to the findings, so
//! the caller decides whether they matter.

pub mod config;
pub(crate) mod context;
pub mod error;
pub mod progress;
pub mod report;
pub(crate) mod tasks;
pub(crate) mod utils;
