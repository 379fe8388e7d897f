//! Report configuration for gradeshape
//!
//! A report configuration is a TOML file naming the leaf paths of the
//! desired report shape:
//!
//! ```toml
//! version = 1
//!
//! [report]
//! name = "midterm"
//! paths = ["code/tests", "code/style", "git"]
//! ```

pub mod types;

use std::fs;
use std::path::Path;

use crate::bail_invalid;
use crate::error::{GradeError, Result};
use crate::structure::GradeStructure;

pub use types::{ReportConfig, ReportShapeConfig, REPORT_FORMAT_VERSION};

impl ReportConfig {
    /// A configuration describing `structure`
    pub fn from_structure(name: Option<String>, structure: &GradeStructure) -> Self {
        let paths = if structure.is_root_only() {
            Vec::new()
        } else {
            structure.leaves().into_iter().collect()
        };
        ReportConfig {
            report: ReportShapeConfig { name, paths },
            ..Default::default()
        }
    }

    /// The target structure described by this configuration. No paths
    /// means the root-only structure, i.e. a single overall mark.
    pub fn target(&self) -> GradeStructure {
        GradeStructure::given(self.report.paths.iter().cloned())
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| GradeError::io_operation("read", path.display(), e))?;
        let config: ReportConfig = toml::from_str(&content)?;

        if config.version > REPORT_FORMAT_VERSION {
            bail_invalid!(
                "report format version",
                format!(
                    "{} (newest supported: {})",
                    config.version, REPORT_FORMAT_VERSION
                )
            );
        }

        tracing::debug!(
            path = %path.display(),
            paths = config.report.paths.len(),
            "report_config_loaded"
        );
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GradeError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criterion::GradePath;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.version, REPORT_FORMAT_VERSION);
        assert!(config.report.name.is_none());
        assert!(config.target().is_root_only());
    }

    #[test]
    fn test_parse_report_paths() {
        let config: ReportConfig = toml::from_str(
            r#"
            [report]
            name = "midterm"
            paths = ["code/tests", "code/style", "git"]
            "#,
        )
        .unwrap();
        assert_eq!(config.version, REPORT_FORMAT_VERSION);
        assert_eq!(config.report.name.as_deref(), Some("midterm"));
        let leaves: Vec<String> = config
            .target()
            .leaves()
            .iter()
            .map(GradePath::to_string)
            .collect();
        assert_eq!(leaves, vec!["code/style", "code/tests", "git"]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.toml");

        let structure = GradeStructure::given([
            "a/b".parse::<GradePath>().unwrap(),
            "c".parse::<GradePath>().unwrap(),
        ]);
        let config = ReportConfig::from_structure(Some("final".to_string()), &structure);
        config.save(&path).unwrap();

        let loaded = ReportConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.target(), structure);
    }

    #[test]
    fn test_root_only_structure_has_no_paths() {
        let config = ReportConfig::from_structure(None, &GradeStructure::root_only());
        assert!(config.report.paths.is_empty());
    }

    #[test]
    fn test_newer_version_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.toml");
        fs::write(&path, "version = 99\n").unwrap();
        let err = ReportConfig::load(&path).unwrap_err();
        assert!(matches!(err, GradeError::InvalidValue { .. }));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = ReportConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
