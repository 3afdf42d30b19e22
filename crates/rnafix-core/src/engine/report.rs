use super::error::ResidueIssue;
use crate::core::models::ids::{AtomId, ResidueId};
use crate::core::models::residue::NucleotideType;
use std::cmp::Ordering;
use std::fmt;

/// Identifies a residue in findings, e.g. `A:G12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResidueLabel {
    pub residue_id: ResidueId,
    pub chain: char,
    pub residue_number: isize,
    pub nucleotide: NucleotideType,
}

impl fmt::Display for ResidueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.chain, self.nucleotide, self.residue_number)
    }
}

/// Two non-bonded atoms closer than their clash threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct ClashFinding {
    pub residue_a: ResidueLabel,
    pub atom_a: AtomId,
    pub atom_a_name: &'static str,
    pub residue_b: ResidueLabel,
    pub atom_b: AtomId,
    pub atom_b_name: &'static str,
    pub distance: f64,
    pub threshold: f64,
}

impl ClashFinding {
    /// How far the pair intrudes past the threshold, in Angstroms.
    pub fn overlap(&self) -> f64 {
        self.threshold - self.distance
    }
}

impl fmt::Display for ClashFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {} {}: {:.3} A (threshold {:.3} A)",
            self.residue_a,
            self.atom_a_name,
            self.residue_b,
            self.atom_b_name,
            self.distance,
            self.threshold
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClashReport {
    /// Clashes in enumeration order: chain pair, residue pair, then atom pair.
    pub findings: Vec<ClashFinding>,
    pub issues: Vec<ResidueIssue>,
    /// Number of atom pairs tested against the threshold.
    pub pairs_checked: u64,
}

impl ClashReport {
    pub fn count(&self) -> usize {
        self.findings.len()
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty() && self.issues.is_empty()
    }

    /// Findings ordered from the largest overlap to the smallest.
    pub fn sorted_by_severity(&self) -> Vec<&ClashFinding> {
        let mut sorted: Vec<&ClashFinding> = self.findings.iter().collect();
        sorted.sort_by(|a, b| {
            b.overlap()
                .partial_cmp(&a.overlap())
                .unwrap_or(Ordering::Equal)
        });
        sorted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondKind {
    /// A covalent bond inside one residue.
    Intra,
    /// The O3'(r)–P(r+1) bond between consecutive residues.
    BackboneLinkage,
}

/// A covalent bond whose length deviates from ideal by at least the tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct BondViolation {
    pub kind: BondKind,
    pub residue_a: ResidueLabel,
    pub atom_a: AtomId,
    pub atom_a_name: &'static str,
    pub residue_b: ResidueLabel,
    pub atom_b: AtomId,
    pub atom_b_name: &'static str,
    pub ideal_length: f64,
    pub observed_length: f64,
    pub deviation: f64,
    /// The atom that was moved, if a correction was applied.
    pub moved_atom: Option<AtomId>,
    /// Bond length after the correction.
    pub corrected_length: Option<f64>,
    /// The sweep (starting at 1) in which the violation was found.
    pub pass: usize,
}

impl BondViolation {
    pub fn is_corrected(&self) -> bool {
        self.moved_atom.is_some()
    }
}

impl fmt::Display for BondViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {} {}: {:.3} A vs ideal {:.3} A ({:.1}% off)",
            self.residue_a,
            self.atom_a_name,
            self.residue_b,
            self.atom_b_name,
            self.observed_length,
            self.ideal_length,
            self.deviation * 100.0
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BondReport {
    /// Bonds measured, summed over all sweeps.
    pub bonds_checked: u64,
    pub violations: Vec<BondViolation>,
    pub issues: Vec<ResidueIssue>,
    /// Number of sweeps performed.
    pub passes: usize,
    /// Whether the last sweep found no violation.
    pub converged: bool,
}

impl BondReport {
    pub fn count(&self) -> usize {
        self.violations.len()
    }

    pub fn corrections(&self) -> impl Iterator<Item = &BondViolation> {
        self.violations.iter().filter(|v| v.is_corrected())
    }

    /// Violations found in one sweep.
    pub fn violations_in_pass(&self, pass: usize) -> impl Iterator<Item = &BondViolation> {
        self.violations.iter().filter(move |v| v.pass == pass)
    }
}
