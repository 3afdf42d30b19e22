use crate::core::forcefield::linkage::is_backbone_linkage;
use crate::core::forcefield::params::{NucleotideTemplate, ParamError, resolve_template};
use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomId;
use crate::core::models::residue::Residue;
use crate::core::models::system::MolecularSystem;
use crate::engine::error::{EngineError, ResidueIssue};
use crate::engine::report::ResidueLabel;
use itertools::{Either, Itertools, iproduct};
use tracing::warn;

/// A residue that passed layout validation, with its atoms resolved.
#[derive(Debug)]
pub struct ResidueSlot<'a> {
    pub label: ResidueLabel,
    /// Position of the parent chain in the system's chain order.
    pub chain_index: usize,
    /// Position of the residue in its chain, counting skipped residues.
    pub sequence_index: usize,
    pub template: &'static NucleotideTemplate,
    /// Atoms in canonical order, so `atoms[i]` is described by `template` index `i`.
    pub atoms: Vec<(AtomId, &'a Atom)>,
}

/// How strictly a residue's atoms must match its template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutCheck {
    /// Every atom index must exist in the template; missing trailing atoms are tolerated.
    IndicesOnly,
    /// Atom count must match exactly, and names too when `check_names` is set.
    Exact { check_names: bool },
}

/// The model's residues grouped by chain, in enumeration order.
#[derive(Debug, Default)]
pub struct ResolvedModel<'a> {
    pub chains: Vec<Vec<ResidueSlot<'a>>>,
    pub issues: Vec<ResidueIssue>,
}

impl<'a> ResolvedModel<'a> {
    pub fn residue_count(&self) -> usize {
        self.chains.iter().map(Vec::len).sum()
    }

    pub fn slots(&self) -> impl Iterator<Item = &ResidueSlot<'a>> {
        self.chains.iter().flatten()
    }
}

/// Resolves every residue of the system against its nucleotide template.
///
/// Residues that fail validation are recorded as issues and left out; the rest
/// of the model is still resolved. Dangling IDs are a broken system and abort.
pub fn resolve_model(
    system: &MolecularSystem,
    check: LayoutCheck,
) -> Result<ResolvedModel<'_>, EngineError> {
    let mut model = ResolvedModel::default();

    for (chain_index, (_, chain)) in system.chains_iter().enumerate() {
        let mut slots = Vec::with_capacity(chain.len());
        for (sequence_index, &residue_id) in chain.residues().iter().enumerate() {
            let residue = system
                .residue(residue_id)
                .ok_or(EngineError::ResidueNotFound(residue_id))?;
            let atoms = residue
                .atoms()
                .iter()
                .map(|&atom_id| {
                    system
                        .atom(atom_id)
                        .map(|atom| (atom_id, atom))
                        .ok_or(EngineError::AtomNotFound(atom_id))
                })
                .collect::<Result<Vec<_>, _>>()?;

            match validate_layout(residue, &atoms, check) {
                Ok(template) => slots.push(ResidueSlot {
                    label: ResidueLabel {
                        residue_id,
                        chain: chain.id,
                        residue_number: residue.residue_number,
                        nucleotide: template.nucleotide,
                    },
                    chain_index,
                    sequence_index,
                    template,
                    atoms,
                }),
                Err(source) => {
                    let issue = ResidueIssue {
                        residue_id,
                        chain: chain.id,
                        residue_number: residue.residue_number,
                        residue_name: residue.name.trim().to_string(),
                        source,
                    };
                    warn!(%issue, "Skipping residue.");
                    model.issues.push(issue);
                }
            }
        }
        model.chains.push(slots);
    }

    Ok(model)
}

fn validate_layout(
    residue: &Residue,
    atoms: &[(AtomId, &Atom)],
    check: LayoutCheck,
) -> Result<&'static NucleotideTemplate, ParamError> {
    let template = resolve_template(residue)?;
    match check {
        LayoutCheck::IndicesOnly => {
            if atoms.len() > template.atom_count() {
                return Err(ParamError::AtomIndexOutOfRange {
                    nucleotide: template.nucleotide,
                    index: template.atom_count(),
                    size: template.atom_count(),
                });
            }
        }
        LayoutCheck::Exact { check_names } => {
            let names: Vec<&str> = atoms.iter().map(|(_, atom)| atom.name.as_str()).collect();
            template.check_layout(&names, check_names)?;
        }
    }
    Ok(template)
}

/// Every unordered residue pair: chain pairs `c1 <= c2`, and `r1 < r2` within a chain.
pub fn residue_pairs<'m, 'a>(
    chains: &'m [Vec<ResidueSlot<'a>>],
) -> impl Iterator<Item = (&'m ResidueSlot<'a>, &'m ResidueSlot<'a>)> {
    (0..chains.len())
        .flat_map(move |c1| (c1..chains.len()).map(move |c2| (c1, c2)))
        .flat_map(move |(c1, c2)| {
            if c1 == c2 {
                Either::Left(chains[c1].iter().tuple_combinations())
            } else {
                Either::Right(chains[c1].iter().cartesian_product(chains[c2].iter()))
            }
        })
}

/// Whether atom `i` of `first` and atom `j` of `second` are held together by
/// the phosphodiester linkage of consecutive residues in one chain.
#[inline]
pub fn is_bonded_across(first: &ResidueSlot, second: &ResidueSlot, i: usize, j: usize) -> bool {
    first.chain_index == second.chain_index
        && second.sequence_index == first.sequence_index + 1
        && is_backbone_linkage(i, j)
}

/// Atom index pairs of two residues that are eligible for clash testing.
pub fn atom_pairs<'s>(
    first: &'s ResidueSlot,
    second: &'s ResidueSlot,
) -> impl Iterator<Item = (usize, usize)> + 's {
    iproduct!(0..first.atoms.len(), 0..second.atoms.len())
        .filter(move |&(i, j)| !is_bonded_across(first, second, i, j))
}
