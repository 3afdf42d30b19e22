//! # rnafix
//!
//! Geometric validation of RNA models: finds atom pairs whose van der Waals
//! spheres overlap and pulls covalent bonds that drifted from their ideal
//! lengths back into place.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Chains, nucleotide residues and atoms in a
//!   `MolecularSystem`, plus the compiled-in per-nucleotide parameter tables.
//!
//! - **[`engine`]: The Logic Core.** Configuration, progress reporting, reports
//!   and the two analyzers, clash detection and bond length correction.
//!
//! - **[`workflows`]: The Public API.** `detect_clashes`, `fix_bond_lengths` and
//!   the combined validation `run`.
//!
//! The library only emits `tracing` events; installing a subscriber is up to the
//! application.

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod testing;
