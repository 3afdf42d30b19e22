//! Analysis tasks run over a molecular system.
//!
//! Each task resolves the model against the nucleotide templates on its own,
//! reports progress through the shared reporter and returns a self-contained
//! report. Tasks never call each other; sequencing them is left to the
//! workflows layer.

pub mod bond_correction;
pub mod clash_detection;
