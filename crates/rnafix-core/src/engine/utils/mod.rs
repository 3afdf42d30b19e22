//! Helpers shared by the analysis tasks: residue resolution, pair enumeration
//! and spatial neighbor queries.

pub mod pairs;
pub mod spatial;
