//! # Core Module
//!
//! Structural data and static chemical knowledge that the analysis engine
//! operates on.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Chains, nucleotide residues and atoms
//! - **Geometric Parameters** ([`forcefield`]) - Per-nucleotide VDW radii, ideal bond lengths and the backbone linkage
//! - **Utilities** ([`utils`]) - Bond geometry helpers and atom name normalization
//!
//! Nothing in this layer performs I/O or logging; parsing structure files and
//! deciding what to do with the analysis results is left to the caller.

pub mod forcefield;
pub mod models;
pub mod utils;
