use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_OVERLAP_ALLOWANCE: f64 = 0.4;
pub const DEFAULT_BOND_TOLERANCE: f64 = 0.10;
pub const DEFAULT_MAX_PASSES: usize = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {value} ({reason})")]
    InvalidParameter {
        parameter: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Strategy used to enumerate candidate atom pairs for clash detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClashSearch {
    /// Every atom pair in the model is tested.
    #[default]
    Exhaustive,
    /// Only pairs returned by a k-d tree radius query are tested.
    SpatialIndex,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ClashConfig {
    /// Subtracted from the summed VDW radii to form the clash threshold, in Angstroms.
    pub overlap_allowance: f64,
    pub search: ClashSearch,
}

impl Default for ClashConfig {
    fn default() -> Self {
        Self {
            overlap_allowance: DEFAULT_OVERLAP_ALLOWANCE,
            search: ClashSearch::Exhaustive,
        }
    }
}

impl ClashConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.overlap_allowance.is_finite() && self.overlap_allowance >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "overlap-allowance",
                value: self.overlap_allowance.to_string(),
                reason: "must be a finite, non-negative distance",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct BondConfig {
    /// Fractional deviation from the ideal length at which a bond is flagged.
    pub tolerance: f64,
    /// When false, violations are reported but no atom is moved.
    pub apply_corrections: bool,
    /// Upper bound on correction sweeps; sweeping stops early once a sweep is clean.
    pub max_passes: usize,
    /// Also check the O3'–P bond between consecutive residues of a chain.
    pub include_backbone_linkage: bool,
    /// Require atom names to match the canonical layout, not just the atom count.
    pub check_atom_names: bool,
}

impl Default for BondConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_BOND_TOLERANCE,
            apply_corrections: true,
            max_passes: DEFAULT_MAX_PASSES,
            include_backbone_linkage: false,
            check_atom_names: true,
        }
    }
}

impl BondConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConfigError::InvalidParameter {
                parameter: "tolerance",
                value: self.tolerance.to_string(),
                reason: "must be a finite, positive fraction",
            });
        }
        if self.max_passes == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "max-passes",
                value: self.max_passes.to_string(),
                reason: "at least one pass is required",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    pub clash: ClashConfig,
    pub bonds: BondConfig,
}

impl ValidationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.clash.validate()?;
        self.bonds.validate()
    }

    /// Loads and validates a configuration from a TOML file.
    ///
    /// Every key is optional; missing keys keep their default values.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Default)]
pub struct ValidationConfigBuilder {
    overlap_allowance: Option<f64>,
    search: Option<ClashSearch>,
    tolerance: Option<f64>,
    apply_corrections: Option<bool>,
    max_passes: Option<usize>,
    include_backbone_linkage: Option<bool>,
    check_atom_names: Option<bool>,
}

impl ValidationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlap_allowance(mut self, allowance: f64) -> Self {
        self.overlap_allowance = Some(allowance);
        self
    }
    pub fn search(mut self, search: ClashSearch) -> Self {
        self.search = Some(search);
        self
    }
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
    pub fn apply_corrections(mut self, apply: bool) -> Self {
        self.apply_corrections = Some(apply);
        self
    }
    pub fn max_passes(mut self, passes: usize) -> Self {
        self.max_passes = Some(passes);
        self
    }
    pub fn include_backbone_linkage(mut self, include: bool) -> Self {
        self.include_backbone_linkage = Some(include);
        self
    }
    pub fn check_atom_names(mut self, check: bool) -> Self {
        self.check_atom_names = Some(check);
        self
    }

    pub fn build(self) -> Result<ValidationConfig, ConfigError> {
        let clash_defaults = ClashConfig::default();
        let bond_defaults = BondConfig::default();
        let config = ValidationConfig {
            clash: ClashConfig {
                overlap_allowance: self
                    .overlap_allowance
                    .unwrap_or(clash_defaults.overlap_allowance),
                search: self.search.unwrap_or(clash_defaults.search),
            },
            bonds: BondConfig {
                tolerance: self.tolerance.unwrap_or(bond_defaults.tolerance),
                apply_corrections: self
                    .apply_corrections
                    .unwrap_or(bond_defaults.apply_corrections),
                max_passes: self.max_passes.unwrap_or(bond_defaults.max_passes),
                include_backbone_linkage: self
                    .include_backbone_linkage
                    .unwrap_or(bond_defaults.include_backbone_linkage),
                check_atom_names: self
                    .check_atom_names
                    .unwrap_or(bond_defaults.check_atom_names),
            },
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn builder_without_overrides_yields_defaults() {
        let config = ValidationConfigBuilder::new().build().unwrap();
        assert_eq!(config, ValidationConfig::default());
        assert_eq!(config.clash.overlap_allowance, 0.4);
        assert_eq!(config.clash.search, ClashSearch::Exhaustive);
        assert_eq!(config.bonds.tolerance, 0.10);
        assert!(config.bonds.apply_corrections);
        assert_eq!(config.bonds.max_passes, DEFAULT_MAX_PASSES);
        assert!(!config.bonds.include_backbone_linkage);
        assert!(config.bonds.check_atom_names);
    }

    #[test]
    fn builder_applies_overrides() {
        let config = ValidationConfigBuilder::new()
            .overlap_allowance(0.5)
            .search(ClashSearch::SpatialIndex)
            .tolerance(0.05)
            .apply_corrections(false)
            .max_passes(4)
            .include_backbone_linkage(true)
            .check_atom_names(false)
            .build()
            .unwrap();
        assert_eq!(config.clash.overlap_allowance, 0.5);
        assert_eq!(config.clash.search, ClashSearch::SpatialIndex);
        assert_eq!(config.bonds.tolerance, 0.05);
        assert!(!config.bonds.apply_corrections);
        assert_eq!(config.bonds.max_passes, 4);
        assert!(config.bonds.include_backbone_linkage);
        assert!(!config.bonds.check_atom_names);
    }

    #[test]
    fn builder_rejects_invalid_tolerance() {
        for bad in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let err = ValidationConfigBuilder::new().tolerance(bad).build().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidParameter {
                    parameter: "tolerance",
                    ..
                }
            ));
        }
    }

    #[test]
    fn builder_rejects_negative_allowance_and_zero_passes() {
        let err = ValidationConfigBuilder::new()
            .overlap_allowance(-0.1)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter {
                parameter: "overlap-allowance",
                ..
            }
        ));

        let err = ValidationConfigBuilder::new().max_passes(0).build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter {
                parameter: "max-passes",
                ..
            }
        ));
    }

    #[test]
    fn zero_allowance_is_valid() {
        let config = ValidationConfigBuilder::new()
            .overlap_allowance(0.0)
            .build()
            .unwrap();
        assert_eq!(config.clash.overlap_allowance, 0.0);
    }

    #[test]
    fn from_toml_str_fills_missing_keys_with_defaults() {
        let config = ValidationConfig::from_toml_str(
            r#"
            [bonds]
            tolerance = 0.05
            max-passes = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.bonds.tolerance, 0.05);
        assert_eq!(config.bonds.max_passes, 3);
        assert!(config.bonds.apply_corrections);
        assert_eq!(config.clash, ClashConfig::default());
    }

    #[test]
    fn from_toml_str_accepts_empty_document() {
        let config = ValidationConfig::from_toml_str("").unwrap();
        assert_eq!(config, ValidationConfig::default());
    }

    #[test]
    fn from_toml_str_rejects_unknown_keys() {
        let err = ValidationConfig::from_toml_str("[clash]\nthreshold = 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn from_toml_str_validates_values() {
        let err = ValidationConfig::from_toml_str("[bonds]\ntolerance = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { .. }));
    }

    #[test]
    fn from_file_loads_all_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rnafix.toml");
        fs::write(
            &path,
            r#"
            [clash]
            overlap-allowance = 0.3
            search = "spatial-index"

            [bonds]
            tolerance = 0.08
            apply-corrections = false
            include-backbone-linkage = true
            check-atom-names = false
            "#,
        )
        .unwrap();

        let config = ValidationConfig::from_file(&path).unwrap();
        assert_eq!(config.clash.overlap_allowance, 0.3);
        assert_eq!(config.clash.search, ClashSearch::SpatialIndex);
        assert_eq!(config.bonds.tolerance, 0.08);
        assert!(!config.bonds.apply_corrections);
        assert!(config.bonds.include_backbone_linkage);
        assert!(!config.bonds.check_atom_names);
        assert_eq!(config.bonds.max_passes, DEFAULT_MAX_PASSES);
    }

    #[test]
    fn from_file_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let err = ValidationConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn from_file_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[bonds\ntolerance = ").unwrap();
        let err = ValidationConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }
}
