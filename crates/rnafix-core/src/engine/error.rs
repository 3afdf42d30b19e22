use super::config::ConfigError;
use crate::core::forcefield::params::ParamError;
use crate::core::models::ids::{AtomId, ResidueId};
use thiserror::Error;

/// Failures that stop an analysis task as a whole.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Residue {0:?} is referenced by a chain but missing from the system")]
    ResidueNotFound(ResidueId),

    #[error("Atom {0:?} is referenced by a residue but missing from the system")]
    AtomNotFound(AtomId),
}

/// A malformed residue that an analyzer skipped.
///
/// Issues are collected next to the findings instead of aborting the scan; the
/// caller decides whether any of them is fatal.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Residue {chain}:{residue_name}{residue_number} skipped: {source}")]
pub struct ResidueIssue {
    pub residue_id: ResidueId,
    pub chain: char,
    pub residue_number: isize,
    pub residue_name: String,
    pub source: ParamError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::residue::NucleotideType;
    use std::error::Error;

    #[test]
    fn residue_issue_displays_location_and_cause() {
        let issue = ResidueIssue {
            residue_id: ResidueId::default(),
            chain: 'B',
            residue_number: 12,
            residue_name: "G".to_string(),
            source: ParamError::AtomCountMismatch {
                nucleotide: NucleotideType::Guanine,
                expected: 23,
                found: 21,
            },
        };
        assert_eq!(
            issue.to_string(),
            "Residue B:G12 skipped: Nucleotide G expects 23 atoms, but the residue has 21"
        );
        assert!(issue.source().is_some());
    }

    #[test]
    fn config_errors_convert_into_engine_errors() {
        let err: EngineError = ConfigError::InvalidParameter {
            parameter: "tolerance",
            value: "0".to_string(),
            reason: "must be a finite, positive fraction",
        }
        .into();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
