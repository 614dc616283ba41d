//! Application configuration structures.
//!
//! Loaded from a TOML file; every field has a default so a missing or
//! partial file still yields a usable configuration.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Public imaging-archive source settings
    #[serde(default)]
    pub tcia: TciaConfig,

    /// Institutional operative source settings
    #[serde(default)]
    pub operative: OperativeConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults on any failure.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Failed to load config from {}: {}. Using defaults.",
                path.as_ref().display(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.tcia.sheet.trim().is_empty() {
            return Err(AppError::validation("tcia.sheet must not be empty"));
        }
        if self.tcia.image_dir.trim().is_empty() {
            return Err(AppError::validation("tcia.image_dir must not be empty"));
        }
        if self.tcia.mask_dir.trim().is_empty() {
            return Err(AppError::validation("tcia.mask_dir must not be empty"));
        }
        if self.tcia.image_suffix.trim().is_empty() {
            return Err(AppError::validation("tcia.image_suffix must not be empty"));
        }

        if self.operative.sheet.trim().is_empty() {
            return Err(AppError::validation("operative.sheet must not be empty"));
        }
        if self.operative.image_dir.trim().is_empty() {
            return Err(AppError::validation("operative.image_dir must not be empty"));
        }
        if self.operative.mask_dir.trim().is_empty() {
            return Err(AppError::validation("operative.mask_dir must not be empty"));
        }
        if self.operative.image_suffix.trim().is_empty() {
            return Err(AppError::validation(
                "operative.image_suffix must not be empty",
            ));
        }
        if self.operative.mask_suffix.trim().is_empty() {
            return Err(AppError::validation(
                "operative.mask_suffix must not be empty",
            ));
        }
        if self.operative.id_column.trim().is_empty() {
            return Err(AppError::validation("operative.id_column must not be empty"));
        }
        if let Err(e) = Regex::new(&self.operative.excluded_id_pattern) {
            return Err(AppError::pattern(
                self.operative.excluded_id_pattern.clone(),
                e,
            ));
        }

        Ok(())
    }
}

/// Settings for the public tumor-imaging archive source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TciaConfig {
    /// Root directory of the archive dataset
    #[serde(default = "defaults::tcia_root")]
    pub root: PathBuf,

    /// Clinical sheet file name under the root
    #[serde(default = "defaults::tcia_sheet")]
    pub sheet: String,

    /// Image directory name under the root
    #[serde(default = "defaults::tcia_image_dir")]
    pub image_dir: String,

    /// Mask directory name under the root
    #[serde(default = "defaults::tcia_mask_dir")]
    pub mask_dir: String,

    /// Suffix appended to the subject id for image and mask files
    #[serde(default = "defaults::tcia_image_suffix")]
    pub image_suffix: String,
}

impl TciaConfig {
    /// Full path to the clinical sheet.
    pub fn sheet_path(&self) -> PathBuf {
        self.root.join(&self.sheet)
    }

    /// Full path to the image directory.
    pub fn image_dir_path(&self) -> PathBuf {
        self.root.join(&self.image_dir)
    }

    /// Full path to the mask directory.
    pub fn mask_dir_path(&self) -> PathBuf {
        self.root.join(&self.mask_dir)
    }
}

impl Default for TciaConfig {
    fn default() -> Self {
        Self {
            root: defaults::tcia_root(),
            sheet: defaults::tcia_sheet(),
            image_dir: defaults::tcia_image_dir(),
            mask_dir: defaults::tcia_mask_dir(),
            image_suffix: defaults::tcia_image_suffix(),
        }
    }
}

/// Settings for the institutional operative source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperativeConfig {
    /// Root directory of the operative dataset
    #[serde(default = "defaults::operative_root")]
    pub root: PathBuf,

    /// Clinical sheet file name under the root
    #[serde(default = "defaults::operative_sheet")]
    pub sheet: String,

    /// Image directory name under the root
    #[serde(default = "defaults::operative_image_dir")]
    pub image_dir: String,

    /// Mask directory name under the root
    #[serde(default = "defaults::operative_mask_dir")]
    pub mask_dir: String,

    /// Suffix appended to the subject id for image files
    #[serde(default = "defaults::operative_image_suffix")]
    pub image_suffix: String,

    /// Suffix appended to the subject id for mask files
    #[serde(default = "defaults::operative_mask_suffix")]
    pub mask_suffix: String,

    /// Column holding the subject identifier
    #[serde(default = "defaults::operative_id_column")]
    pub id_column: String,

    /// Single subject id withdrawn from the study
    #[serde(default = "defaults::operative_excluded_id")]
    pub excluded_id: String,

    /// Anchored pattern of subject ids excluded for quality control
    #[serde(default = "defaults::operative_excluded_pattern")]
    pub excluded_id_pattern: String,
}

impl OperativeConfig {
    /// Full path to the clinical sheet.
    pub fn sheet_path(&self) -> PathBuf {
        self.root.join(&self.sheet)
    }

    /// Full path to the image directory.
    pub fn image_dir_path(&self) -> PathBuf {
        self.root.join(&self.image_dir)
    }

    /// Full path to the mask directory.
    pub fn mask_dir_path(&self) -> PathBuf {
        self.root.join(&self.mask_dir)
    }
}

impl Default for OperativeConfig {
    fn default() -> Self {
        Self {
            root: defaults::operative_root(),
            sheet: defaults::operative_sheet(),
            image_dir: defaults::operative_image_dir(),
            mask_dir: defaults::operative_mask_dir(),
            image_suffix: defaults::operative_image_suffix(),
            mask_suffix: defaults::operative_mask_suffix(),
            id_column: defaults::operative_id_column(),
            excluded_id: defaults::operative_excluded_id(),
            excluded_id_pattern: defaults::operative_excluded_pattern(),
        }
    }
}

/// Default values for configuration
mod defaults {
    use std::path::PathBuf;

    pub fn tcia_root() -> PathBuf {
        PathBuf::from("../Data/TCIA")
    }

    pub fn tcia_sheet() -> String {
        "HCC-TACE-Seg_clinical_data-V2.csv".to_string()
    }

    pub fn tcia_image_dir() -> String {
        "TCIA_image_PV".to_string()
    }

    pub fn tcia_mask_dir() -> String {
        "TCIA_results_phase_PV".to_string()
    }

    pub fn tcia_image_suffix() -> String {
        "_PV.nii.gz".to_string()
    }

    pub fn operative_root() -> PathBuf {
        PathBuf::from("../Data/OP")
    }

    pub fn operative_sheet() -> String {
        "OP_clinical_data.csv".to_string()
    }

    pub fn operative_image_dir() -> String {
        "images".to_string()
    }

    pub fn operative_mask_dir() -> String {
        "masks".to_string()
    }

    pub fn operative_image_suffix() -> String {
        ".nii.gz".to_string()
    }

    pub fn operative_mask_suffix() -> String {
        "_mask.nii.gz".to_string()
    }

    pub fn operative_id_column() -> String {
        "OP_ID".to_string()
    }

    pub fn operative_excluded_id() -> String {
        "OP_0061".to_string()
    }

    pub fn operative_excluded_pattern() -> String {
        "^OP_009[1-3]$".to_string()
    }
}
