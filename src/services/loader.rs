use std::path::Path;

use crate::error::CatalogError;
use crate::services::catalog::{Catalog, LoadReport};

/// Read a JSON catalog file and load it into `catalog`.
///
/// The file holds either an array of dye records or an object keyed by
/// record id. On any failure the catalog keeps whatever it had before.
pub fn load_catalog_file(catalog: &Catalog, path: &Path) -> Result<LoadReport, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to read catalog file");
        CatalogError::Io(e)
    })?;

    let data: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to parse catalog file");
        CatalogError::Json(e)
    })?;

    let report = catalog.load(&data)?;
    tracing::info!(path = %path.display(), loaded = report.loaded, "Loaded catalog file");
    Ok(report)
}
