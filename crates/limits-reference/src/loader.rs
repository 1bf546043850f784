//! Reference dataset loader
//!
//! Decodes the dataset through typed records rather than a generic value
//! tree, so every way a dataset can be malformed maps onto one
//! [`DatasetError`] variant.

use crate::error::DatasetError;
use crate::records::DatasetRecord;
use limits_schema::Schema;
use std::fmt;
use std::path::Path;

/// Serialization format of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetFormat {
    /// JSON, the format the host bundles
    Json,
    /// YAML, convenient for hand-written fixtures
    Yaml,
}

impl DatasetFormat {
    /// Supported file extensions (without dot)
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Yaml => &["yaml", "yml"],
        }
    }

    /// Pick format by file extension
    ///
    /// # Errors
    /// `DatasetError::UnsupportedExtension` if no format claims it
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        [Self::Json, Self::Yaml]
            .into_iter()
            .find(|format| format.extensions().contains(&extension))
            .ok_or_else(|| DatasetError::UnsupportedExtension(extension.to_string()))
    }
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        })
    }
}

/// Reference schema loader
#[derive(Debug, Clone, Copy)]
pub struct ReferenceSchemaLoader {
    format: DatasetFormat,
}

impl ReferenceSchemaLoader {
    /// Create loader for a format
    #[inline]
    #[must_use]
    pub fn new(format: DatasetFormat) -> Self {
        Self { format }
    }

    /// Format this loader decodes
    #[inline]
    #[must_use]
    pub fn format(&self) -> DatasetFormat {
        self.format
    }

    /// Decode dataset text into a reference schema
    ///
    /// Unknown property types become opaque `Other` definitions.
    ///
    /// # Errors
    /// - `DatasetError::Syntax` if the text is not a mapping with exactly
    ///   `levelEvents` and `settings`, each a sequence of group records
    /// - `DatasetError::InvalidField` if a bound has the wrong shape
    /// - `DatasetError::DuplicateGroup` / `DuplicateProperty` on name clashes
    pub fn load(&self, raw: &str) -> Result<Schema, DatasetError> {
        let record: DatasetRecord = match self.format {
            DatasetFormat::Json => serde_json::from_str(raw)
                .map_err(|e| DatasetError::syntax(self.format, e))?,
            DatasetFormat::Yaml => serde_yaml::from_str(raw)
                .map_err(|e| DatasetError::syntax(self.format, e))?,
        };

        let schema = record.into_schema()?;
        tracing::debug!(
            format = %self.format,
            event_groups = schema.event_groups.len(),
            setting_groups = schema.setting_groups.len(),
            properties = schema.property_count(),
            "Decoded reference dataset"
        );
        Ok(schema)
    }

    /// Read and decode a dataset file, picking the format by extension
    ///
    /// # Errors
    /// - `DatasetError::UnsupportedExtension` for unknown extensions
    /// - `DatasetError::Io` if the file cannot be read
    /// - any error of [`load`](Self::load)
    pub fn load_path(path: impl AsRef<Path>) -> Result<Schema, DatasetError> {
        let path = path.as_ref();
        let loader = Self::new(DatasetFormat::from_path(path)?);
        let raw = std::fs::read_to_string(path).map_err(|e| DatasetError::io_error(path, e))?;
        loader.load(&raw)
    }
}

impl Default for ReferenceSchemaLoader {
    fn default() -> Self {
        Self::new(DatasetFormat::Json)
    }
}
