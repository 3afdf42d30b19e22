//! # Core Models Module
//!
//! Data structures that represent an RNA structural model: chains of nucleotide
//! residues, each holding its heavy atoms in the canonical order of its type.
//!
//! ## Overview
//!
//! The analyzers address atoms by their index within a residue, so the models
//! keep insertion order everywhere:
//!
//! - **Chains** are enumerated in the order they were added
//! - **Residues** within a chain follow backbone connectivity (5' to 3')
//! - **Atoms** within a residue follow the nucleotide's canonical layout
//!
//! ## Key Components
//!
//! - [`atom`] - Atom name and Cartesian position
//! - [`residue`] - Nucleotide residue and the [`residue::NucleotideType`] classification
//! - [`chain`] - Ordered polynucleotide chain
//! - [`system`] - The complete model with stable slot-map IDs
//! - [`builder`] - Chain-by-chain construction with explicit errors
//! - [`ids`] - Unique identifier types for atoms, residues, and chains
//!
//! ## Usage
//!
//! ```ignore
//! use rnafix::core::models::{builder::MolecularSystemBuilder, residue::NucleotideType};
//!
//! let mut builder = MolecularSystemBuilder::new();
//! builder.start_chain('A');
//! builder.add_nucleotide(1, NucleotideType::Guanine, &positions)?;
//! let system = builder.build();
//! ```

pub mod atom;
pub mod builder;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod system;
