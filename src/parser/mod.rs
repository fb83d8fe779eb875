//! Loaders for reading tabular files into datasets
//!
//! Loading is a collaborator of the engine, not part of it: loaders
//! produce plain `Dataset` values and the engine never touches a file.

mod csv;
mod json;

use std::path::Path;

use anyhow::{bail, Result};

use crate::model::Dataset;

pub use self::csv::CsvLoader;
pub use self::json::JsonLoader;

/// Trait for loading tabular data files
pub trait Loader: Send + Sync {
    /// Load a file into a Dataset
    fn load(&self, path: &Path) -> Result<Dataset>;

    /// Check if this loader can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for picking a loader by file extension
pub struct LoaderFactory {
    loaders: Vec<Box<dyn Loader>>,
}

impl Default for LoaderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl LoaderFactory {
    pub fn new() -> Self {
        Self {
            loaders: vec![Box::new(CsvLoader), Box::new(JsonLoader)],
        }
    }

    /// Get a loader for the given file path
    pub fn get_loader(&self, path: &Path) -> Result<&dyn Loader> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        for loader in &self.loaders {
            if loader.supports_extension(&ext) {
                return Ok(loader.as_ref());
            }
        }

        bail!(
            "Unsupported file format: {}",
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
        )
    }

    /// Load a file using the appropriate loader
    pub fn load(&self, path: &Path) -> Result<Dataset> {
        let loader = self.get_loader(path)?;
        loader.load(path)
    }
}
