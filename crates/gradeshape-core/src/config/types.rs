//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::criterion::GradePath;

/// Current report configuration format version
pub const REPORT_FORMAT_VERSION: u32 = 1;

/// Report configuration: the shape graders want grades compressed to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Format version for compatibility checking
    #[serde(default = "default_version")]
    pub version: u32,

    /// Target report shape
    #[serde(default)]
    pub report: ReportShapeConfig,
}

/// The desired shape of a report, as leaf paths (`code/tests`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportShapeConfig {
    /// Display name of the report (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Leaf paths of the report; intermediate levels are implied
    #[serde(default)]
    pub paths: Vec<GradePath>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            version: REPORT_FORMAT_VERSION,
            report: ReportShapeConfig::default(),
        }
    }
}

fn default_version() -> u32 {
    REPORT_FORMAT_VERSION
}
