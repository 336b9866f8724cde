//! convert.toml manifest parsing
//!
//! A manifest lists several OBJ conversions sharing a set of default options.
//! Relative paths are resolved against the manifest's directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::formats::ACORN_EXT;
use crate::mesh::{self, ConversionStats, OriginMode, TransformConfig, UvDimension};

/// Default manifest file name
pub const DEFAULT_MANIFEST: &str = "convert.toml";

/// convert.toml manifest structure
#[derive(Debug, Deserialize)]
pub struct ConvertManifest {
    /// Directory for outputs without an explicit path (default: next to input)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub defaults: ConversionOptions,
    #[serde(default)]
    pub meshes: Vec<MeshEntry>,

    /// Directory the manifest was loaded from
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Transform options, all optional so entries can override defaults
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ConversionOptions {
    /// Degrees clockwise about Y, looking down from above
    #[serde(default)]
    pub rotate: Option<f32>,
    #[serde(default)]
    pub origin: Option<OriginMode>,
    /// Total height of the converted mesh
    #[serde(default)]
    pub height: Option<f32>,
    /// UV components per entry (2 or 3)
    #[serde(default)]
    pub uv: Option<u8>,
}

/// Single mesh conversion
#[derive(Debug, Deserialize)]
pub struct MeshEntry {
    pub input: PathBuf,
    /// Output path; defaults to the input with an `.acn` extension
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(flatten)]
    pub options: ConversionOptions,
}

impl ConversionOptions {
    /// Fill unset fields from `defaults`
    pub fn or(&self, defaults: &ConversionOptions) -> ConversionOptions {
        ConversionOptions {
            rotate: self.rotate.or(defaults.rotate),
            origin: self.origin.or(defaults.origin),
            height: self.height.or(defaults.height),
            uv: self.uv.or(defaults.uv),
        }
    }

    pub fn to_transform_config(&self) -> Result<TransformConfig> {
        let mut config = TransformConfig::default();
        if let Some(degrees) = self.rotate {
            config = config.with_rotation_degrees(degrees);
        }
        if let Some(origin) = self.origin {
            config = config.with_origin(origin);
        }
        if let Some(height) = self.height {
            config = config.with_target_height(height);
        }
        if let Some(uv) = self.uv {
            config = config.with_uv_dimension(UvDimension::try_from(uv)?);
        }
        config.validate()?;
        Ok(config)
    }
}

impl ConvertManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        let mut manifest = Self::parse(&content)?;
        manifest.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(manifest)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse convert.toml")
    }

    /// Validate every entry's options without converting anything
    pub fn validate(&self) -> Result<()> {
        if self.meshes.is_empty() {
            anyhow::bail!("No [[meshes]] entries in manifest");
        }
        for entry in &self.meshes {
            self.transform_config(entry)
                .with_context(|| format!("Invalid options for {}", entry.input.display()))?;
        }
        Ok(())
    }

    /// Effective transform for an entry (entry options over defaults)
    pub fn transform_config(&self, entry: &MeshEntry) -> Result<TransformConfig> {
        entry.options.or(&self.defaults).to_transform_config()
    }

    pub fn input_path(&self, entry: &MeshEntry) -> PathBuf {
        self.base_dir.join(&entry.input)
    }

    /// Output path for an entry
    ///
    /// Priority: `output_override`, then the manifest's `output_dir`, then the
    /// input's own directory.
    pub fn output_path(&self, entry: &MeshEntry, output_override: Option<&Path>) -> PathBuf {
        let out_dir = output_override
            .map(Path::to_path_buf)
            .or_else(|| self.output_dir.as_ref().map(|d| self.base_dir.join(d)));

        match (&entry.output, out_dir) {
            (Some(output), Some(dir)) => dir.join(output),
            (Some(output), None) => self.base_dir.join(output),
            (None, Some(dir)) => {
                let name = entry.input.file_name().map(PathBuf::from).unwrap_or_default();
                dir.join(name.with_extension(ACORN_EXT))
            }
            (None, None) => self.input_path(entry).with_extension(ACORN_EXT),
        }
    }
}

/// Load a manifest from disk
pub fn load_manifest(path: &Path) -> Result<ConvertManifest> {
    ConvertManifest::load(path)
}

/// Validate a loaded manifest
pub fn validate(manifest: &ConvertManifest) -> Result<()> {
    manifest.validate()
}

/// Convert every entry in order, stopping at the first failure
pub fn build_all(
    manifest: &ConvertManifest,
    output_override: Option<&Path>,
) -> Result<Vec<ConversionStats>> {
    manifest.validate()?;

    let mut all_stats = Vec::with_capacity(manifest.meshes.len());
    for entry in &manifest.meshes {
        let input = manifest.input_path(entry);
        let output = manifest.output_path(entry, output_override);
        let config = manifest.transform_config(entry)?;

        tracing::info!("Converting {:?} -> {:?}", input, output);
        all_stats.push(mesh::convert_obj(&input, &output, &config)?);
    }

    tracing::info!("Converted {} meshes", all_stats.len());
    Ok(all_stats)
}
