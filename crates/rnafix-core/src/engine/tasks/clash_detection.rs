use crate::core::models::system::MolecularSystem;
use crate::engine::config::{ClashConfig, ClashSearch};
use crate::engine::context::AnalysisContext;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::report::{ClashFinding, ClashReport};
use crate::engine::utils::pairs::{
    LayoutCheck, ResidueSlot, ResolvedModel, atom_pairs, is_bonded_across, resolve_model,
    residue_pairs,
};
use crate::engine::utils::spatial::AtomIndex;
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const ANALYZER: &str = "clash-detection";

/// Slack added to the k-d tree query radius so that rounding in the squared
/// distance can never drop a pair the exact comparison would report.
const SEARCH_MARGIN: f64 = 1e-6;

type PairKey = (usize, usize, usize, usize, usize, usize);

#[instrument(skip_all, name = "clash_detection_task")]
pub fn run(system: &MolecularSystem, context: &AnalysisContext) -> Result<ClashReport, EngineError> {
    let config = &context.config.clash;
    config.validate()?;
    detect(system, config, context.reporter)
}

/// Finds every pair of atoms, in different residues and not joined by the
/// backbone linkage, that is closer than the sum of their VDW radii minus the
/// overlap allowance.
///
/// The model is only read. Residues with an unknown type, or with more atoms
/// than their template describes, are skipped and reported as issues.
pub(crate) fn detect(
    system: &MolecularSystem,
    config: &ClashConfig,
    reporter: &ProgressReporter,
) -> Result<ClashReport, EngineError> {
    reporter.report(Progress::Message("Detecting steric clashes...".to_string()));
    info!(
        overlap_allowance = config.overlap_allowance,
        search = ?config.search,
        "Detecting steric clashes."
    );

    let model = resolve_model(system, LayoutCheck::IndicesOnly)?;
    let (findings, pairs_checked) = match config.search {
        ClashSearch::Exhaustive => exhaustive_search(&model, config.overlap_allowance, reporter),
        ClashSearch::SpatialIndex => spatial_search(&model, config.overlap_allowance, reporter),
    };

    for finding in &findings {
        debug!(%finding, "Clash found.");
    }
    reporter.report(Progress::ScanFinish {
        analyzer: ANALYZER,
        findings: findings.len(),
    });
    info!(
        num_clashes = findings.len(),
        pairs_checked,
        skipped_residues = model.issues.len(),
        "Clash detection complete."
    );

    Ok(ClashReport {
        findings,
        issues: model.issues,
        pairs_checked,
    })
}

#[inline]
fn check_pair(
    first: &ResidueSlot,
    i: usize,
    second: &ResidueSlot,
    j: usize,
    overlap_allowance: f64,
) -> Option<ClashFinding> {
    let (atom_a, a) = first.atoms[i];
    let (atom_b, b) = second.atoms[j];
    let threshold =
        first.template.vdw_radii[i] + second.template.vdw_radii[j] - overlap_allowance;
    let distance = a.distance_to(b);

    (distance < threshold).then(|| ClashFinding {
        residue_a: first.label,
        atom_a,
        atom_a_name: first.template.atom_names[i],
        residue_b: second.label,
        atom_b,
        atom_b_name: second.template.atom_names[j],
        distance,
        threshold,
    })
}

fn exhaustive_search(
    model: &ResolvedModel,
    overlap_allowance: f64,
    reporter: &ProgressReporter,
) -> (Vec<ClashFinding>, u64) {
    let pairs: Vec<_> = residue_pairs(&model.chains).collect();
    reporter.report(Progress::ScanStart {
        analyzer: ANALYZER,
        total_steps: pairs.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = pairs.iter();

    #[cfg(feature = "parallel")]
    let iterator = pairs.par_iter();

    let per_pair: Vec<(Vec<ClashFinding>, u64)> = iterator
        .map(|&(first, second)| {
            let mut checked = 0u64;
            let findings: Vec<ClashFinding> = atom_pairs(first, second)
                .inspect(|_| checked += 1)
                .filter_map(|(i, j)| check_pair(first, i, second, j, overlap_allowance))
                .collect();
            reporter.report(Progress::Step);
            (findings, checked)
        })
        .collect();

    let pairs_checked = per_pair.iter().map(|(_, checked)| checked).sum();
    let findings = per_pair
        .into_iter()
        .flat_map(|(findings, _)| findings)
        .collect();
    (findings, pairs_checked)
}

fn spatial_search(
    model: &ResolvedModel,
    overlap_allowance: f64,
    reporter: &ProgressReporter,
) -> (Vec<ClashFinding>, u64) {
    // (slot ordinal, slot, atom index) in enumeration order.
    let entries: Vec<(usize, &ResidueSlot, usize)> = model
        .slots()
        .enumerate()
        .flat_map(|(ordinal, slot)| (0..slot.atoms.len()).map(move |i| (ordinal, slot, i)))
        .collect();

    let Some(index) = AtomIndex::new(
        entries
            .iter()
            .map(|&(_, slot, i)| &slot.atoms[i].1.position),
    ) else {
        warn!(
            atoms = entries.len(),
            "Atom coordinates are too degenerate for the spatial index; using exhaustive search."
        );
        return exhaustive_search(model, overlap_allowance, reporter);
    };

    reporter.report(Progress::ScanStart {
        analyzer: ANALYZER,
        total_steps: entries.len() as u64,
    });

    let max_radius = model
        .slots()
        .map(|slot| slot.template.max_vdw_radius())
        .fold(0.0, f64::max);
    let search_radius = 2.0 * max_radius - overlap_allowance + SEARCH_MARGIN;
    if search_radius <= 0.0 {
        return (Vec::new(), 0);
    }

    debug!(
        atoms = index.len(),
        search_radius, "Built spatial index for clash search."
    );

    #[cfg(not(feature = "parallel"))]
    let iterator = entries.iter().enumerate();

    #[cfg(feature = "parallel")]
    let iterator = entries.par_iter().enumerate();

    let per_atom: Vec<(Vec<(PairKey, ClashFinding)>, u64)> = iterator
        .map(|(g, &(ordinal_a, first, i))| {
            let mut checked = 0u64;
            let mut found = Vec::new();
            for h in index.neighbors_of(g, search_radius) {
                let (ordinal_b, second, j) = entries[h];
                if h <= g || ordinal_a == ordinal_b || is_bonded_across(first, second, i, j) {
                    continue;
                }
                checked += 1;
                if let Some(finding) = check_pair(first, i, second, j, overlap_allowance) {
                    let key = (
                        first.chain_index,
                        second.chain_index,
                        ordinal_a,
                        ordinal_b,
                        i,
                        j,
                    );
                    found.push((key, finding));
                }
            }
            reporter.report(Progress::Step);
            (found, checked)
        })
        .collect();

    let pairs_checked = per_atom.iter().map(|(_, checked)| checked).sum();
    let mut keyed: Vec<(PairKey, ClashFinding)> = per_atom
        .into_iter()
        .flat_map(|(found, _)| found)
        .collect();
    keyed.sort_unstable_by_key(|(key, _)| *key);
    (
        keyed.into_iter().map(|(_, finding)| finding).collect(),
        pairs_checked,
    )
}
