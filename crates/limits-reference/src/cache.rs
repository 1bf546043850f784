//! Lazily loaded, process-lifetime reference schema

use crate::error::DatasetError;
use crate::loader::{DatasetFormat, ReferenceSchemaLoader};
use limits_schema::Schema;
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::sync::Arc;

/// Where the reference dataset comes from
#[derive(Debug, Clone)]
pub enum ReferenceSource {
    /// Dataset text already in memory (e.g. an embedded resource)
    Text {
        /// Raw dataset
        raw: Arc<str>,
        /// Its format
        format: DatasetFormat,
    },
    /// Dataset file, format picked by extension
    Path(PathBuf),
}

impl ReferenceSource {
    /// In-memory JSON dataset
    #[inline]
    #[must_use]
    pub fn json(raw: impl Into<Arc<str>>) -> Self {
        Self::Text {
            raw: raw.into(),
            format: DatasetFormat::Json,
        }
    }

    fn load(&self) -> Result<Schema, DatasetError> {
        match self {
            Self::Text { raw, format } => ReferenceSchemaLoader::new(*format).load(raw),
            Self::Path(path) => ReferenceSchemaLoader::load_path(path),
        }
    }
}

/// Reference schema, decoded on first use and immutable afterwards
///
/// A failed load leaves the cache empty, so the next caller retries.
#[derive(Debug)]
pub struct ReferenceCache {
    source: ReferenceSource,
    schema: OnceCell<Arc<Schema>>,
}

impl ReferenceCache {
    /// Create cache over a source without loading it
    #[inline]
    #[must_use]
    pub fn new(source: ReferenceSource) -> Self {
        Self {
            source,
            schema: OnceCell::new(),
        }
    }

    /// Cache that already holds a decoded schema
    #[must_use]
    pub fn preloaded(schema: Schema) -> Self {
        Self {
            source: ReferenceSource::json("{}"),
            schema: OnceCell::with_value(Arc::new(schema)),
        }
    }

    /// Decoded schema, loading it if this is the first request
    ///
    /// # Errors
    /// Any [`DatasetError`] from decoding the source
    pub fn get_or_load(&self) -> Result<Arc<Schema>, DatasetError> {
        self.schema
            .get_or_try_init(|| {
                tracing::info!(source = %self.source_label(), "Loading reference dataset");
                self.source.load().map(Arc::new).map_err(|e| {
                    tracing::error!("Reference dataset unusable: {}", e);
                    e
                })
            })
            .cloned()
    }

    /// Whether the schema has been decoded
    #[inline]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.schema.get().is_some()
    }

    fn source_label(&self) -> String {
        match &self.source {
            ReferenceSource::Text { format, .. } => format!("embedded {format}"),
            ReferenceSource::Path(path) => path.display().to_string(),
        }
    }
}
