use super::atom::Atom;
use super::ids::{ChainId, ResidueId};
use super::residue::NucleotideType;
use super::system::MolecularSystem;
use crate::core::forcefield::params::template;
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    #[error("A chain must be started before residues can be added")]
    NoActiveChain,
    #[error("Residue {residue_number} already exists in chain '{chain}'")]
    DuplicateResidue { chain: char, residue_number: isize },
    #[error(
        "Nucleotide {nucleotide} needs {expected} atom positions in canonical order, but {found} were given"
    )]
    PositionCountMismatch {
        nucleotide: NucleotideType,
        expected: usize,
        found: usize,
    },
}

/// Incremental construction of a [`MolecularSystem`], chain by chain.
///
/// Residues are appended to the most recently started chain in the order they
/// are added, which defines backbone connectivity.
#[derive(Debug, Default)]
pub struct MolecularSystemBuilder {
    system: MolecularSystem,
    current_chain: Option<(char, ChainId)>,
}

impl MolecularSystemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or resumes) the chain with the given identifier.
    pub fn start_chain(&mut self, id: char) -> &mut Self {
        let chain_id = self.system.add_chain(id);
        self.current_chain = Some((id, chain_id));
        self
    }

    /// Appends a nucleotide whose atoms are named from the canonical layout of `nucleotide`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::PositionCountMismatch`] unless exactly one position
    /// per canonical atom is supplied.
    pub fn add_nucleotide(
        &mut self,
        residue_number: isize,
        nucleotide: NucleotideType,
        positions: &[Point3<f64>],
    ) -> Result<ResidueId, BuildError> {
        let names = template(nucleotide).atom_names;
        if positions.len() != names.len() {
            return Err(BuildError::PositionCountMismatch {
                nucleotide,
                expected: names.len(),
                found: positions.len(),
            });
        }

        let name = nucleotide.to_string();
        let atoms: Vec<(&str, Point3<f64>)> = names
            .iter()
            .copied()
            .zip(positions.iter().copied())
            .collect();
        self.push_residue(residue_number, &name, Some(nucleotide), &atoms)
    }

    /// Appends a residue with explicitly named atoms.
    ///
    /// The residue type is parsed from `name`; an unrecognized name is kept
    /// as-is with no type, and the analyzers report it when they reach it.
    pub fn add_residue(
        &mut self,
        residue_number: isize,
        name: &str,
        atoms: &[(&str, Point3<f64>)],
    ) -> Result<ResidueId, BuildError> {
        let residue_type = name.parse::<NucleotideType>().ok();
        self.push_residue(residue_number, name, residue_type, atoms)
    }

    pub fn build(self) -> MolecularSystem {
        self.system
    }

    fn push_residue(
        &mut self,
        residue_number: isize,
        name: &str,
        residue_type: Option<NucleotideType>,
        atoms: &[(&str, Point3<f64>)],
    ) -> Result<ResidueId, BuildError> {
        let (chain, chain_id) = self.current_chain.ok_or(BuildError::NoActiveChain)?;
        if self
            .system
            .find_residue_by_id(chain_id, residue_number)
            .is_some()
        {
            return Err(BuildError::DuplicateResidue {
                chain,
                residue_number,
            });
        }

        let residue_id = self
            .system
            .add_residue(chain_id, residue_number, name, residue_type)
            .ok_or(BuildError::NoActiveChain)?;
        for &(atom_name, position) in atoms {
            self.system
                .add_atom_to_residue(residue_id, Atom::new(atom_name, residue_id, position));
        }
        Ok(residue_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin_positions(count: usize) -> Vec<Point3<f64>> {
        (0..count).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect()
    }

    #[test]
    fn add_nucleotide_names_atoms_canonically() {
        let mut builder = MolecularSystemBuilder::new();
        builder.start_chain('A');
        let residue_id = builder
            .add_nucleotide(1, NucleotideType::Cytosine, &origin_positions(20))
            .unwrap();
        let system = builder.build();

        let residue = system.residue(residue_id).unwrap();
        assert_eq!(residue.residue_type, Some(NucleotideType::Cytosine));
        assert_eq!(residue.name, "C");
        assert_eq!(residue.atoms().len(), 20);

        let o3 = residue.get_atom_id_by_name("O3'").unwrap();
        assert_eq!(residue.atom_at(8), Some(o3));
        assert_eq!(system.atom(o3).unwrap().position, Point3::new(8.0, 0.0, 0.0));
    }

    #[test]
    fn add_nucleotide_rejects_wrong_position_count() {
        let mut builder = MolecularSystemBuilder::new();
        builder.start_chain('A');
        let err = builder
            .add_nucleotide(1, NucleotideType::Guanine, &origin_positions(22))
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::PositionCountMismatch {
                nucleotide: NucleotideType::Guanine,
                expected: 23,
                found: 22,
            }
        );
    }

    #[test]
    fn adding_residue_without_chain_fails() {
        let mut builder = MolecularSystemBuilder::new();
        let err = builder.add_residue(1, "A", &[]).unwrap_err();
        assert_eq!(err, BuildError::NoActiveChain);
    }

    #[test]
    fn duplicate_residue_number_is_rejected() {
        let mut builder = MolecularSystemBuilder::new();
        builder.start_chain('A');
        builder.add_residue(7, "U", &[]).unwrap();
        let err = builder.add_residue(7, "U", &[]).unwrap_err();
        assert_eq!(
            err,
            BuildError::DuplicateResidue {
                chain: 'A',
                residue_number: 7
            }
        );
    }

    #[test]
    fn add_residue_parses_type_and_keeps_unknown_names() {
        let mut builder = MolecularSystemBuilder::new();
        builder.start_chain('A');
        let known = builder
            .add_residue(1, "  G", &[("P", Point3::origin())])
            .unwrap();
        let unknown = builder
            .add_residue(2, "PSU", &[("P", Point3::new(5.0, 0.0, 0.0))])
            .unwrap();
        let system = builder.build();

        assert_eq!(
            system.residue(known).unwrap().residue_type,
            Some(NucleotideType::Guanine)
        );
        let unknown = system.residue(unknown).unwrap();
        assert_eq!(unknown.residue_type, None);
        assert_eq!(unknown.name, "PSU");
    }

    #[test]
    fn residues_follow_chain_switches() {
        let mut builder = MolecularSystemBuilder::new();
        builder.start_chain('A');
        let a1 = builder.add_residue(1, "A", &[]).unwrap();
        builder.start_chain('B');
        let b1 = builder.add_residue(1, "U", &[]).unwrap();
        builder.start_chain('A');
        let a2 = builder.add_residue(2, "C", &[]).unwrap();
        let system = builder.build();

        let chain_a = system.find_chain_by_id('A').unwrap();
        let chain_b = system.find_chain_by_id('B').unwrap();
        assert_eq!(system.chain(chain_a).unwrap().residues(), &[a1, a2]);
        assert_eq!(system.chain(chain_b).unwrap().residues(), &[b1]);
    }
}
