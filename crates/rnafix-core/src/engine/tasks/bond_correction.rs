use crate::core::forcefield::linkage::{BACKBONE_LINKAGE_LENGTH, O3_PRIME_INDEX, PHOSPHORUS_INDEX};
use crate::core::forcefield::params::NucleotideTemplate;
use crate::core::models::ids::AtomId;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::geometry::{fractional_deviation, place_at_distance};
use crate::engine::config::BondConfig;
use crate::engine::context::AnalysisContext;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::report::{BondKind, BondReport, BondViolation, ResidueLabel};
use crate::engine::utils::pairs::{LayoutCheck, ResidueSlot, resolve_model};
use nalgebra::Point3;
use tracing::{debug, info, instrument, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const ANALYZER: &str = "bond-correction";

/// Strain changes closer than this are treated as equal.
const STRAIN_TIE: f64 = 1e-12;

/// A validated residue, detached from the borrow of the system so that atom
/// positions can be written back between sweeps.
struct ResidueTarget {
    label: ResidueLabel,
    chain_index: usize,
    sequence_index: usize,
    template: &'static NucleotideTemplate,
    atom_ids: Vec<AtomId>,
    depths: Vec<usize>,
    /// Set when the O3'–P linkage into this residue is checked; P then only
    /// moves through linkage correction.
    pinned_phosphorus: bool,
}

impl ResidueTarget {
    fn from_slot(slot: &ResidueSlot) -> Self {
        Self {
            label: slot.label,
            chain_index: slot.chain_index,
            sequence_index: slot.sequence_index,
            template: slot.template,
            atom_ids: slot.atoms.iter().map(|&(id, _)| id).collect(),
            depths: slot.template.anchor_depths(),
            pinned_phosphorus: false,
        }
    }

    fn precedes(&self, next: &ResidueTarget) -> bool {
        self.chain_index == next.chain_index && next.sequence_index == self.sequence_index + 1
    }

    fn is_pinned(&self, index: usize) -> bool {
        self.pinned_phosphorus && index == PHOSPHORUS_INDEX
    }
}

struct ResidueOutcome {
    positions: Vec<Point3<f64>>,
    violations: Vec<BondViolation>,
    bonds_checked: u64,
}

#[instrument(skip_all, name = "bond_correction_task")]
pub fn run(
    system: &mut MolecularSystem,
    context: &AnalysisContext,
) -> Result<BondReport, EngineError> {
    let config = &context.config.bonds;
    config.validate()?;
    correct(system, config, context.reporter)
}

/// Checks every covalent bond of every residue against its ideal length and,
/// unless running detect-only, moves one atom of each violating bond so the
/// bond has exactly its ideal length.
///
/// Either atom can move along the current bond vector. The one chosen is the
/// atom whose other bonds end up less strained, strain being the summed
/// squared fractional deviation. On equal strain the atom farther from the
/// residue's phosphorus along the bond graph moves, and on equal depth the
/// atom later in canonical order. Bonds are processed in ascending index order
/// within a residue, each using the positions left by the previous correction.
///
/// Sweeps repeat until one finds nothing to correct or `max_passes` is spent,
/// so a converged run leaves coordinates that a second run does not touch.
/// Residues whose layout does not match their template are skipped and
/// reported as issues without being touched.
pub(crate) fn correct(
    system: &mut MolecularSystem,
    config: &BondConfig,
    reporter: &ProgressReporter,
) -> Result<BondReport, EngineError> {
    reporter.report(Progress::Message("Checking bond lengths...".to_string()));
    info!(
        tolerance = config.tolerance,
        apply_corrections = config.apply_corrections,
        max_passes = config.max_passes,
        include_backbone_linkage = config.include_backbone_linkage,
        "Checking covalent bond lengths."
    );

    let (mut targets, issues) = {
        let model = resolve_model(
            system,
            LayoutCheck::Exact {
                check_names: config.check_atom_names,
            },
        )?;
        let targets: Vec<ResidueTarget> =
            model.slots().map(ResidueTarget::from_slot).collect();
        (targets, model.issues)
    };

    let linkages: Vec<(usize, usize)> = if config.include_backbone_linkage {
        targets
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0].precedes(&pair[1]))
            .map(|(r, _)| (r, r + 1))
            .collect()
    } else {
        Vec::new()
    };
    for &(_, next) in &linkages {
        targets[next].pinned_phosphorus = true;
    }

    let max_passes = if config.apply_corrections {
        config.max_passes
    } else {
        1
    };

    let mut report = BondReport {
        issues,
        ..BondReport::default()
    };

    for pass in 1..=max_passes {
        let (violations, bonds_checked) =
            sweep(system, &targets, &linkages, config, pass, reporter)?;
        debug!(
            pass,
            violations = violations.len(),
            bonds_checked,
            "Bond sweep finished."
        );

        report.passes = pass;
        report.bonds_checked += bonds_checked;
        let clean = violations.is_empty();
        report.violations.extend(violations);
        if clean {
            report.converged = true;
            break;
        }
    }

    reporter.report(Progress::ScanFinish {
        analyzer: ANALYZER,
        findings: report.count(),
    });
    if config.apply_corrections && config.max_passes > 1 && !report.converged {
        warn!(
            passes = report.passes,
            "Bond lengths still violated tolerance in the last sweep."
        );
    }
    info!(
        num_violations = report.count(),
        num_corrections = report.corrections().count(),
        passes = report.passes,
        converged = report.converged,
        skipped_residues = report.issues.len(),
        "Bond length check complete."
    );

    Ok(report)
}

fn sweep(
    system: &mut MolecularSystem,
    targets: &[ResidueTarget],
    linkages: &[(usize, usize)],
    config: &BondConfig,
    pass: usize,
    reporter: &ProgressReporter,
) -> Result<(Vec<BondViolation>, u64), EngineError> {
    reporter.report(Progress::ScanStart {
        analyzer: ANALYZER,
        total_steps: targets.len() as u64,
    });

    let outcomes: Vec<ResidueOutcome> = {
        let snapshot: &MolecularSystem = system;

        #[cfg(not(feature = "parallel"))]
        let iterator = targets.iter();

        #[cfg(feature = "parallel")]
        let iterator = targets.par_iter();

        iterator
            .map(|target| {
                let outcome = check_residue(snapshot, target, config, pass);
                reporter.report(Progress::Step);
                outcome
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut violations = Vec::new();
    let mut bonds_checked = 0u64;
    for (target, outcome) in targets.iter().zip(outcomes) {
        bonds_checked += outcome.bonds_checked;
        if outcome.violations.iter().any(BondViolation::is_corrected) {
            for (&atom_id, &position) in target.atom_ids.iter().zip(&outcome.positions) {
                system
                    .atom_mut(atom_id)
                    .ok_or(EngineError::AtomNotFound(atom_id))?
                    .position = position;
            }
        }
        violations.extend(outcome.violations);
    }

    for &(r, next) in linkages {
        bonds_checked += 1;
        if let Some(violation) = check_linkage(system, &targets[r], &targets[next], config, pass)? {
            violations.push(violation);
        }
    }

    Ok((violations, bonds_checked))
}

fn check_residue(
    system: &MolecularSystem,
    target: &ResidueTarget,
    config: &BondConfig,
    pass: usize,
) -> Result<ResidueOutcome, EngineError> {
    let mut positions = target
        .atom_ids
        .iter()
        .map(|&atom_id| {
            system
                .atom(atom_id)
                .map(|atom| atom.position)
                .ok_or(EngineError::AtomNotFound(atom_id))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let template = target.template;
    let mut violations = Vec::new();
    let mut bonds_checked = 0u64;

    for (i, j, ideal) in template.bonds() {
        bonds_checked += 1;
        let observed = nalgebra::distance(&positions[i], &positions[j]);
        let Some(deviation) = fractional_deviation(observed, ideal) else {
            continue;
        };
        if deviation < config.tolerance {
            continue;
        }

        let mut violation = BondViolation {
            kind: BondKind::Intra,
            residue_a: target.label,
            atom_a: target.atom_ids[i],
            atom_a_name: template.atom_names[i],
            residue_b: target.label,
            atom_b: target.atom_ids[j],
            atom_b_name: template.atom_names[j],
            ideal_length: ideal,
            observed_length: observed,
            deviation,
            moved_atom: None,
            corrected_length: None,
            pass,
        };

        if config.apply_corrections {
            match choose_move(target, &positions, i, j, ideal) {
                Some((fixed, moving, position)) => {
                    positions[moving] = position;
                    violation.moved_atom = Some(target.atom_ids[moving]);
                    violation.corrected_length =
                        Some(nalgebra::distance(&positions[fixed], &position));
                    trace!(bond = %violation, moved = template.atom_names[moving], "Bond corrected.");
                }
                None => {
                    warn!(bond = %violation, "Bonded atoms coincide; bond left uncorrected.");
                }
            }
        } else {
            debug!(bond = %violation, "Bond length violation.");
        }

        violations.push(violation);
    }

    Ok(ResidueOutcome {
        positions,
        violations,
        bonds_checked,
    })
}

/// Picks which atom of the bond `(i, j)` moves and where it goes, as
/// `(fixed, moving, position)`. `None` when the atoms coincide.
fn choose_move(
    target: &ResidueTarget,
    positions: &[Point3<f64>],
    i: usize,
    j: usize,
    ideal: f64,
) -> Option<(usize, usize, Point3<f64>)> {
    let toward_i = place_at_distance(&positions[j], &positions[i], ideal)?;
    let toward_j = place_at_distance(&positions[i], &positions[j], ideal)?;

    let moves_j = if target.is_pinned(j) {
        false
    } else if target.is_pinned(i) {
        true
    } else {
        let cost_i = strain_change(target.template, positions, i, j, &toward_i);
        let cost_j = strain_change(target.template, positions, j, i, &toward_j);
        if (cost_j - cost_i).abs() > STRAIN_TIE {
            cost_j < cost_i
        } else {
            target.depths[j] >= target.depths[i]
        }
    };

    Some(if moves_j {
        (i, j, toward_j)
    } else {
        (j, i, toward_i)
    })
}

/// Change in the strain of `atom`'s bonds, other than the one to `partner`,
/// if `atom` were moved to `candidate`.
fn strain_change(
    template: &NucleotideTemplate,
    positions: &[Point3<f64>],
    atom: usize,
    partner: usize,
    candidate: &Point3<f64>,
) -> f64 {
    let strain = |length: f64, ideal: f64| ((length - ideal) / ideal).powi(2);
    template
        .neighbors(atom)
        .filter(|&(other, _)| other != partner)
        .map(|(other, ideal)| {
            strain(nalgebra::distance(candidate, &positions[other]), ideal)
                - strain(nalgebra::distance(&positions[atom], &positions[other]), ideal)
        })
        .sum()
}

/// Checks the O3'(r)–P(r+1) bond and, when correcting, moves P(r+1).
fn check_linkage(
    system: &mut MolecularSystem,
    prev: &ResidueTarget,
    next: &ResidueTarget,
    config: &BondConfig,
    pass: usize,
) -> Result<Option<BondViolation>, EngineError> {
    let o3_id = prev.atom_ids[O3_PRIME_INDEX];
    let p_id = next.atom_ids[PHOSPHORUS_INDEX];
    let o3 = system
        .atom(o3_id)
        .ok_or(EngineError::AtomNotFound(o3_id))?
        .position;
    let p = system
        .atom(p_id)
        .ok_or(EngineError::AtomNotFound(p_id))?
        .position;

    let observed = nalgebra::distance(&o3, &p);
    let Some(deviation) = fractional_deviation(observed, BACKBONE_LINKAGE_LENGTH) else {
        return Ok(None);
    };
    if deviation < config.tolerance {
        return Ok(None);
    }

    let mut violation = BondViolation {
        kind: BondKind::BackboneLinkage,
        residue_a: prev.label,
        atom_a: o3_id,
        atom_a_name: prev.template.atom_names[O3_PRIME_INDEX],
        residue_b: next.label,
        atom_b: p_id,
        atom_b_name: next.template.atom_names[PHOSPHORUS_INDEX],
        ideal_length: BACKBONE_LINKAGE_LENGTH,
        observed_length: observed,
        deviation,
        moved_atom: None,
        corrected_length: None,
        pass,
    };

    if config.apply_corrections {
        match place_at_distance(&o3, &p, BACKBONE_LINKAGE_LENGTH) {
            Some(position) => {
                system
                    .atom_mut(p_id)
                    .ok_or(EngineError::AtomNotFound(p_id))?
                    .position = position;
                violation.moved_atom = Some(p_id);
                violation.corrected_length = Some(nalgebra::distance(&o3, &position));
                trace!(bond = %violation, "Backbone linkage corrected.");
            }
            None => {
                warn!(bond = %violation, "Linkage atoms coincide; bond left uncorrected.");
            }
        }
    } else {
        debug!(bond = %violation, "Backbone linkage violation.");
    }

    Ok(Some(violation))
}
