use super::ids::ResidueId;
use nalgebra::Point3;

/// A heavy atom of a nucleotide residue.
///
/// Atoms carry exactly what the geometric checks consume: the name used for
/// layout validation and reporting, the owning residue, and the Cartesian
/// position. Hydrogens are never stored; the canonical residue layouts omit them.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The PDB-style atom name (e.g., "P", "O3'", "N9").
    pub name: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` at the given position.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            residue_id,
            position,
        }
    }

    /// Euclidean distance to another atom in Angstroms.
    #[inline]
    pub fn distance_to(&self, other: &Atom) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_stores_name_residue_and_position() {
        let residue_id = ResidueId::default();
        let atom = Atom::new("O3'", residue_id, Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.name, "O3'");
        assert_eq!(atom.residue_id, residue_id);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let atom1 = Atom::new("P", ResidueId::default(), Point3::origin());
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }

    #[test]
    fn distance_to_is_euclidean_and_symmetric() {
        let a = Atom::new("C4'", ResidueId::default(), Point3::new(0.0, 0.0, 0.0));
        let b = Atom::new("C5'", ResidueId::default(), Point3::new(3.0, 4.0, 0.0));
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn distance_between_coincident_atoms_is_zero() {
        let a = Atom::new("N1", ResidueId::default(), Point3::new(1.5, -2.0, 0.25));
        assert_eq!(a.distance_to(&a.clone()), 0.0);
    }
}
