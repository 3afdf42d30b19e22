use super::ids::{AtomId, ChainId};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The four standard RNA nucleotides.
///
/// Every geometric parameter table is keyed on this type, so anything outside
/// these four variants is rejected at parse time instead of silently falling
/// through to default parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NucleotideType {
    Adenine,  // A
    Cytosine, // C
    Guanine,  // G
    Uracil,   // U
}

impl NucleotideType {
    pub const ALL: [NucleotideType; 4] = [
        NucleotideType::Adenine,
        NucleotideType::Cytosine,
        NucleotideType::Guanine,
        NucleotideType::Uracil,
    ];

    pub fn one_letter_code(self) -> char {
        match self {
            NucleotideType::Adenine => 'A',
            NucleotideType::Cytosine => 'C',
            NucleotideType::Guanine => 'G',
            NucleotideType::Uracil => 'U',
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unrecognized nucleotide residue name: '{0}'")]
pub struct ParseNucleotideTypeError(pub String);

impl FromStr for NucleotideType {
    type Err = ParseNucleotideTypeError;

    /// Parses a residue name into a `NucleotideType`.
    ///
    /// Surrounding whitespace is ignored, so right-justified PDB names such as
    /// `"  A"` parse the same as `"A"`. Besides the one-letter codes, the
    /// three-letter names and the Amber RNA residue names (including their
    /// 5'/3'-terminal variants) are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" | "ADE" | "A5" | "A3" | "AN" | "RA" | "RA5" | "RA3" => Ok(NucleotideType::Adenine),
            "C" | "CYT" | "C5" | "C3" | "CN" | "RC" | "RC5" | "RC3" => Ok(NucleotideType::Cytosine),
            "G" | "GUA" | "G5" | "G3" | "GN" | "RG" | "RG5" | "RG3" => Ok(NucleotideType::Guanine),
            "U" | "URA" | "U5" | "U3" | "UN" | "RU" | "RU5" | "RU3" => Ok(NucleotideType::Uracil),
            _ => Err(ParseNucleotideTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for NucleotideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.one_letter_code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub residue_number: isize,                   // Residue sequence number from source file
    pub name: String,                            // Residue name as read (e.g., "  A", "RG5")
    pub residue_type: Option<NucleotideType>,    // Parsed type; `None` if unrecognized
    pub chain_id: ChainId,                       // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,               // Atoms in canonical order
    atom_name_map: HashMap<String, AtomId>,      // Map from atom name to its stable ID
}

impl Residue {
    pub(crate) fn new(
        residue_number: isize,
        name: &str,
        residue_type: Option<NucleotideType>,
        chain_id: ChainId,
    ) -> Self {
        Self {
            residue_number,
            name: name.to_string(),
            residue_type,
            chain_id,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map.insert(atom_name.to_string(), atom_id);
    }

    /// Atom IDs in insertion order, which for a well-formed model is the
    /// canonical order of the residue's nucleotide type.
    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    /// The atom at a given canonical index.
    pub fn atom_at(&self, index: usize) -> Option<AtomId> {
        self.atoms.get(index).copied()
    }

    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }
}
