use super::nucleotides::{ADENINE, CYTOSINE, GUANINE, URACIL};
use crate::core::models::residue::{NucleotideType, Residue};
use crate::core::utils::identifiers::normalize_atom_name;
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("Residue '{name}' is not a recognized RNA nucleotide")]
    UnknownResidueType { name: String },
    #[error("Atom index {index} is out of range for nucleotide {nucleotide} ({size} atoms)")]
    AtomIndexOutOfRange {
        nucleotide: NucleotideType,
        index: usize,
        size: usize,
    },
    #[error("Nucleotide {nucleotide} expects {expected} atoms, but the residue has {found}")]
    AtomCountMismatch {
        nucleotide: NucleotideType,
        expected: usize,
        found: usize,
    },
    #[error(
        "Atom {index} of nucleotide {nucleotide} should be '{expected}', but the residue has '{found}'"
    )]
    AtomNameMismatch {
        nucleotide: NucleotideType,
        index: usize,
        expected: String,
        found: String,
    },
}

/// Static geometry of one nucleotide type.
///
/// All three tables are indexed by canonical atom position: `atom_names[i]`,
/// `vdw_radii[i]` and row/column `i` of `bond_lengths` describe the same atom.
#[derive(Debug)]
pub struct NucleotideTemplate {
    pub nucleotide: NucleotideType,
    pub atom_names: &'static [&'static str],
    pub vdw_radii: &'static [f64],
    pub bond_lengths: &'static [&'static [f64]],
}

impl NucleotideTemplate {
    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atom_names.len()
    }

    pub fn atom_name(&self, index: usize) -> Option<&'static str> {
        self.atom_names.get(index).copied()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.atom_names.iter().position(|&n| n == name)
    }

    /// Van der Waals radius of the atom at `index`, in Angstroms.
    pub fn vdw_radius(&self, index: usize) -> Result<f64, ParamError> {
        self.vdw_radii
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Ideal covalent bond length between two atoms, or `None` if they are not bonded.
    pub fn bond_length(&self, i: usize, j: usize) -> Result<Option<f64>, ParamError> {
        let row = self.bond_lengths.get(i).ok_or_else(|| self.out_of_range(i))?;
        let length = row.get(j).copied().ok_or_else(|| self.out_of_range(j))?;
        Ok((length != 0.0).then_some(length))
    }

    /// All covalent bonds as `(i, j, ideal_length)` with `i < j`, in ascending `(i, j)` order.
    pub fn bonds(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.bond_lengths.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .skip(i + 1)
                .filter(|&(_, &length)| length != 0.0)
                .map(move |(j, &length)| (i, j, length))
        })
    }

    /// Atoms covalently bonded to the atom at `index`, with their ideal lengths.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.bond_lengths
            .get(index)
            .into_iter()
            .flat_map(|row| row.iter().copied().enumerate())
            .filter(|&(_, length)| length != 0.0)
    }

    pub fn max_vdw_radius(&self) -> f64 {
        self.vdw_radii.iter().copied().fold(0.0, f64::max)
    }

    /// Bond-graph distance of every atom from the phosphorus anchor at index 0.
    ///
    /// Breaks ties when choosing which atom of a bond to move. Atoms
    /// unreachable from the anchor get `usize::MAX`.
    pub fn anchor_depths(&self) -> Vec<usize> {
        let mut depths = vec![usize::MAX; self.atom_count()];
        if depths.is_empty() {
            return depths;
        }

        let mut queue = VecDeque::from([0usize]);
        depths[0] = 0;
        while let Some(current) = queue.pop_front() {
            let next_depth = depths[current] + 1;
            for (neighbor, &length) in self.bond_lengths[current].iter().enumerate() {
                if length != 0.0 && depths[neighbor] == usize::MAX {
                    depths[neighbor] = next_depth;
                    queue.push_back(neighbor);
                }
            }
        }
        depths
    }

    /// Verifies that a residue's atoms match this template's canonical layout.
    ///
    /// Atom names are compared after normalization of legacy spellings
    /// (`O1P`, `C4*`, ...). With `check_names` off only the count is checked.
    pub fn check_layout(&self, names: &[&str], check_names: bool) -> Result<(), ParamError> {
        if names.len() != self.atom_count() {
            return Err(ParamError::AtomCountMismatch {
                nucleotide: self.nucleotide,
                expected: self.atom_count(),
                found: names.len(),
            });
        }
        if !check_names {
            return Ok(());
        }

        match names
            .iter()
            .zip(self.atom_names)
            .enumerate()
            .find(|(_, (found, expected))| normalize_atom_name(found) != **expected)
        {
            Some((index, (found, expected))) => Err(ParamError::AtomNameMismatch {
                nucleotide: self.nucleotide,
                index,
                expected: expected.to_string(),
                found: found.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn out_of_range(&self, index: usize) -> ParamError {
        ParamError::AtomIndexOutOfRange {
            nucleotide: self.nucleotide,
            index,
            size: self.atom_count(),
        }
    }
}

/// The geometry template for a nucleotide type.
pub fn template(nucleotide: NucleotideType) -> &'static NucleotideTemplate {
    match nucleotide {
        NucleotideType::Adenine => &ADENINE,
        NucleotideType::Cytosine => &CYTOSINE,
        NucleotideType::Guanine => &GUANINE,
        NucleotideType::Uracil => &URACIL,
    }
}

/// The geometry template for a residue, failing if its type was not recognized.
pub fn resolve_template(residue: &Residue) -> Result<&'static NucleotideTemplate, ParamError> {
    residue
        .residue_type
        .map(template)
        .ok_or_else(|| ParamError::UnknownResidueType {
            name: residue.name.trim().to_string(),
        })
}
