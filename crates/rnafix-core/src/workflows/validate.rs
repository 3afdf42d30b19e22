use crate::core::models::system::MolecularSystem;
use crate::engine::config::{ValidationConfig, ValidationConfigBuilder};
use crate::engine::context::AnalysisContext;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::report::{BondReport, ClashReport};
use crate::engine::tasks::{bond_correction, clash_detection};
use tracing::{info, instrument};

/// Outcome of a full validation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Bond violations found, and corrections applied, before the clash scan.
    pub bonds: BondReport,
    /// Clashes remaining in the corrected model.
    pub clashes: ClashReport,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.clashes.is_clean() && self.bonds.count() == 0
    }
}

/// Scans the model for steric clashes with the default settings.
///
/// Residues of unknown type or with more atoms than their template are not
/// scanned; they come back in [`ClashReport::issues`].
#[instrument(skip_all, name = "detect_clashes_workflow")]
pub fn detect_clashes(system: &MolecularSystem) -> Result<ClashReport, EngineError> {
    let config = ValidationConfig::default();
    clash_detection::detect(system, &config.clash, &ProgressReporter::new())
}

/// Corrects every intra-residue bond whose length deviates from its ideal
/// value by at least `tolerance` (a fraction, e.g. `0.10` for 10%).
///
/// Fails only for an invalid tolerance or a structurally broken system.
#[instrument(skip_all, name = "fix_bond_lengths_workflow")]
pub fn fix_bond_lengths(
    system: &mut MolecularSystem,
    tolerance: f64,
) -> Result<BondReport, EngineError> {
    let config = ValidationConfigBuilder::new().tolerance(tolerance).build()?;
    bond_correction::correct(system, &config.bonds, &ProgressReporter::new())
}

/// Corrects bond lengths, then scans the corrected model for clashes.
#[instrument(skip_all, name = "validation_workflow")]
pub fn run(
    system: &mut MolecularSystem,
    config: &ValidationConfig,
    reporter: &ProgressReporter,
) -> Result<ValidationReport, EngineError> {
    config.validate()?;
    info!(
        residues = system.residues_iter().count(),
        atoms = system.atom_count(),
        "Starting validation."
    );

    let context = AnalysisContext::new(reporter, config);
    let bonds = bond_correction::run(system, &context)?;
    let clashes = clash_detection::run(system, &context)?;

    info!(
        bond_violations = bonds.count(),
        corrections = bonds.corrections().count(),
        clashes = clashes.count(),
        "Validation finished."
    );

    Ok(ValidationReport { bonds, clashes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::MolecularSystemBuilder;
    use crate::core::models::residue::NucleotideType;
    use crate::engine::config::{ClashSearch, ConfigError};
    use crate::engine::progress::Progress;
    use crate::testing::{ideal_positions, ideal_single_residue};
    use nalgebra::Vector3;
    use std::sync::Mutex;

    const OP1: usize = 1;
    const C4_PRIME: usize = 5;

    /// Chain A holds an ideal adenine at the origin. Chain B holds a uracil 20 Å
    /// away whose OP1 was dragged onto C4' of the adenine.
    fn stray_phosphate_oxygen() -> MolecularSystem {
        let adenine = ideal_positions(NucleotideType::Adenine, Vector3::zeros());
        let mut uracil = ideal_positions(NucleotideType::Uracil, Vector3::new(20.0, 0.0, 0.0));
        uracil[OP1] = adenine[C4_PRIME];

        let mut builder = MolecularSystemBuilder::new();
        builder.start_chain('A');
        builder
            .add_nucleotide(1, NucleotideType::Adenine, &adenine)
            .unwrap();
        builder.start_chain('B');
        builder
            .add_nucleotide(1, NucleotideType::Uracil, &uracil)
            .unwrap();
        builder.build()
    }

    #[test]
    fn detect_clashes_finds_the_stray_atom() {
        let report = detect_clashes(&stray_phosphate_oxygen()).unwrap();
        assert!(report.count() >= 1);
        assert!(
            report
                .findings
                .iter()
                .any(|f| f.atom_a_name == "C4'" && f.atom_b_name == "OP1" && f.distance == 0.0)
        );
        assert!(report.issues.is_empty());
    }

    #[test]
    fn detect_clashes_on_a_lone_residue_is_clean() {
        let report = detect_clashes(&ideal_single_residue(NucleotideType::Guanine)).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.pairs_checked, 0);
    }

    #[test]
    fn fix_bond_lengths_rejects_non_positive_tolerance() {
        let mut system = ideal_single_residue(NucleotideType::Adenine);
        for tolerance in [0.0, -0.1, f64::NAN] {
            assert!(matches!(
                fix_bond_lengths(&mut system, tolerance),
                Err(EngineError::Config(ConfigError::InvalidParameter {
                    parameter: "tolerance",
                    ..
                }))
            ));
        }
    }

    #[test]
    fn fix_bond_lengths_is_idempotent() {
        let mut system = stray_phosphate_oxygen();
        let first = fix_bond_lengths(&mut system, 0.10).unwrap();
        assert_eq!(first.count(), 1);
        assert_eq!(first.corrections().count(), 1);
        assert_eq!(first.violations[0].residue_a.chain, 'B');

        let second = fix_bond_lengths(&mut system, 0.10).unwrap();
        assert_eq!(second.count(), 0);
    }

    #[test]
    fn fix_bond_lengths_leaves_nothing_for_a_second_call() {
        for nucleotide in NucleotideType::ALL {
            let atom_count = ideal_positions(nucleotide, Vector3::zeros()).len();
            for atom in 0..atom_count {
                for shift in [Vector3::new(0.0, 1.5, 0.0), Vector3::new(0.0, -1.5, 0.0)] {
                    let mut positions = ideal_positions(nucleotide, Vector3::zeros());
                    positions[atom] += shift;
                    let mut builder = MolecularSystemBuilder::new();
                    builder.start_chain('A');
                    builder.add_nucleotide(1, nucleotide, &positions).unwrap();
                    let mut system = builder.build();

                    let first = fix_bond_lengths(&mut system, 0.05).unwrap();
                    assert!(first.converged, "{nucleotide} atom {atom}");
                    let second = fix_bond_lengths(&mut system, 0.05).unwrap();
                    assert_eq!(second.count(), 0, "{nucleotide} atom {atom}");
                }
            }
        }
    }

    #[test]
    fn run_scans_clashes_on_corrected_coordinates() {
        let mut system = stray_phosphate_oxygen();
        let config = ValidationConfig::default();
        let report = run(&mut system, &config, &ProgressReporter::new()).unwrap();

        assert_eq!(report.bonds.corrections().count(), 1);
        assert!(report.clashes.is_clean());
        assert!(!report.is_clean());
    }

    #[test]
    fn run_in_detect_only_mode_still_sees_the_clash() {
        let mut system = stray_phosphate_oxygen();
        let config = ValidationConfigBuilder::new()
            .apply_corrections(false)
            .search(ClashSearch::SpatialIndex)
            .build()
            .unwrap();
        let report = run(&mut system, &config, &ProgressReporter::new()).unwrap();

        assert_eq!(report.bonds.count(), 1);
        assert_eq!(report.bonds.corrections().count(), 0);
        assert!(!report.clashes.is_clean());
    }

    #[test]
    fn run_reports_bond_correction_before_clash_detection() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            events.lock().unwrap().push(event);
        }));
        let mut system = ideal_single_residue(NucleotideType::Cytosine);
        let report = run(&mut system, &ValidationConfig::default(), &reporter).unwrap();
        drop(reporter);
        assert!(report.is_clean());

        let events = events.into_inner().unwrap();
        let analyzers: Vec<&'static str> = events
            .iter()
            .filter_map(|event| match event {
                Progress::ScanStart { analyzer, .. } => Some(*analyzer),
                _ => None,
            })
            .collect();
        assert_eq!(analyzers, vec!["bond-correction", "clash-detection"]);
        let messages: Vec<&str> = events
            .iter()
            .filter_map(|event| match event {
                Progress::Message(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            messages,
            vec!["Checking bond lengths...", "Detecting steric clashes..."]
        );
    }

    #[test]
    fn run_rejects_invalid_configuration() {
        let mut system = ideal_single_residue(NucleotideType::Uracil);
        let mut config = ValidationConfig::default();
        config.bonds.max_passes = 0;
        assert!(matches!(
            run(&mut system, &config, &ProgressReporter::new()),
            Err(EngineError::Config(_))
        ));
    }
}
