use super::ids::ResidueId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub id: char,                        // Chain identifier (e.g., 'A', 'B')
    pub(crate) residues: Vec<ResidueId>, // Residues in backbone connectivity order
}

impl Chain {
    pub(crate) fn new(id: char) -> Self {
        Self {
            id,
            residues: Vec::new(),
        }
    }

    /// Residues in 5' to 3' order. Consecutive entries are joined by a
    /// phosphodiester bond.
    pub fn residues(&self) -> &[ResidueId] {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    #[test]
    fn new_chain_is_empty() {
        let chain = Chain::new('B');
        assert_eq!(chain.id, 'B');
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn residues_keep_insertion_order() {
        let mut chain = Chain::new('A');
        let first = ResidueId::from(KeyData::from_ffi(1));
        let second = ResidueId::from(KeyData::from_ffi(2));
        chain.residues.push(first);
        chain.residues.push(second);
        assert_eq!(chain.residues(), &[first, second]);
        assert_eq!(chain.len(), 2);
    }
}
