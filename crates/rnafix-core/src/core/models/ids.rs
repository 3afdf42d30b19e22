use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to an atom owned by a [`MolecularSystem`](super::system::MolecularSystem).
    pub struct AtomId;
    /// Stable handle to a nucleotide residue.
    pub struct ResidueId;
    /// Stable handle to a polynucleotide chain.
    pub struct ChainId;
}
