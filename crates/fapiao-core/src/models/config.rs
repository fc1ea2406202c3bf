//! Configuration structures for the batch pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for a fapiao batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FapiaoConfig {
    /// Extraction configuration.
    pub extraction: ExtractionConfig,

    /// Rename policy configuration.
    pub rename: RenameConfig,

    /// Export configuration.
    pub export: ExportConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Write a companion .txt diagnostic dump next to every document.
    pub write_text_dump: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            write_text_dump: true,
        }
    }
}

/// Rename policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// Separator between field values in a canonical file name.
    pub separator: String,

    /// Tag prefixed to duplicate file names.
    pub duplicate_tag: String,

    /// Tag prefixed to failed-extraction file names.
    pub failure_tag: String,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            separator: "_".to_string(),
            duplicate_tag: "重复".to_string(),
            failure_tag: "解析失败".to_string(),
        }
    }
}

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Write the CSV table.
    pub csv: bool,

    /// Write the SpreadsheetML workbook.
    pub sheet: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            csv: true,
            sheet: true,
        }
    }
}

impl FapiaoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
