//! # Geometric Parameters Module
//!
//! Compiled-in, read-only geometry for the four standard RNA nucleotides and for
//! the phosphodiester linkage that joins them.
//!
//! ## Overview
//!
//! Each nucleotide type maps to one static [`params::NucleotideTemplate`] holding
//! canonical atom names, Van der Waals radii and the symmetric matrix of ideal
//! covalent bond lengths. Lookups are checked: an unrecognized residue type or an
//! atom index past the end of a table is reported as a [`params::ParamError`]
//! instead of falling back to a default value.
//!
//! ## Key Components
//!
//! - [`params`] - Template type, lookups and layout validation
//! - [`nucleotides`] - The A, C, G and U tables
//! - [`linkage`] - Inter-residue O3'–P linkage distances
//!
//! ## Usage
//!
//! ```ignore
//! use rnafix::core::forcefield::params::template;
//! use rnafix::core::models::residue::NucleotideType;
//!
//! let adenine = template(NucleotideType::Adenine);
//! let ideal = adenine.bond_length(4, 5)?; // C5'–C4'
//! ```

pub mod linkage;
pub(crate) mod nucleotides;
pub mod params;
