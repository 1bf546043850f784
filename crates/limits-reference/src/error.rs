//! Error types for reference dataset decoding

use crate::loader::DatasetFormat;
use limits_schema::Namespace;
use std::path::PathBuf;

/// Reference dataset is missing or malformed
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Not well-formed, or not a mapping of `levelEvents` and `settings`
    /// sequences of group records
    #[error("malformed {format} dataset: {message}")]
    Syntax {
        format: DatasetFormat,
        message: String,
    },

    /// Two groups share a name within a namespace
    #[error("duplicate group '{group}' in {namespace}")]
    DuplicateGroup { namespace: Namespace, group: String },

    /// Two properties share a name within a group
    #[error("duplicate property '{property}' in {namespace}/{group}")]
    DuplicateProperty {
        namespace: Namespace,
        group: String,
        property: String,
    },

    /// A kind-specific field has the wrong shape
    #[error("invalid field '{field}' of {namespace}/{group}/{property}: expected {expected}")]
    InvalidField {
        namespace: Namespace,
        group: String,
        property: String,
        field: &'static str,
        expected: &'static str,
    },

    /// No format is known for the file extension
    #[error("unsupported dataset extension: '{0}'")]
    UnsupportedExtension(String),

    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DatasetError {
    /// Create syntax error for a format
    pub fn syntax(format: DatasetFormat, message: impl ToString) -> Self {
        Self::Syntax {
            format,
            message: message.to_string(),
        }
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
