use serde::Serialize;
use thiserror::Error;

/// How bad a failure is for the engine as a whole.
///
/// `Critical` means no usable catalog came out of the operation; `Warning`
/// means a single record or query was affected and everything else works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog not loaded")]
    NotLoaded,

    #[error("Catalog data must be an array or object, found {found}")]
    InvalidShape { found: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn severity(&self) -> Severity {
        match self {
            CatalogError::NotLoaded => Severity::Error,
            CatalogError::InvalidShape { .. } | CatalogError::Io(_) | CatalogError::Json(_) => {
                Severity::Critical
            }
        }
    }
}

/// Why a single catalog record was dropped during load.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("Record is not an object")]
    NotAnObject,

    #[error("Missing id")]
    MissingId,

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(i64),

    #[error("Missing or empty name")]
    MissingName,

    #[error("Invalid hex color: {0}")]
    InvalidHex(String),

    #[error("Invalid rgb: {0}")]
    InvalidRgb(String),

    #[error("Invalid hsv: {0}")]
    InvalidHsv(String),

    #[error("Category must be a string")]
    InvalidCategory,

    #[error("Cost must be a number")]
    InvalidCost,
}

impl RecordError {
    pub fn severity(&self) -> Severity {
        Severity::Warning
    }
}
