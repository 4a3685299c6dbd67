//! Configuration-related functionality for Facet.

use std::{fs, path::Path};

use eyre::{Result, WrapErr};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{service::default_patch, Error, ViewData, ViewName};

/// Configuration for a walkthrough run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The data written through the application view once the stub record
    /// has been loaded.
    pub patch: ViewData,
    /// The views to report on.
    pub views: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            patch: default_patch(),
            views: ViewName::ALL
                .iter()
                .map(|name| name.as_str().to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Parses configuration from the given string, in the format indicated by
    /// the given file extension.
    pub fn load_as(ext: &str, content: &str) -> Result<Self, Error> {
        let lower = ext.to_lowercase();
        match lower.as_ref() {
            "json" => Ok(serde_json::from_str(content)?),
            "yml" | "yaml" => Ok(serde_yaml::from_str(content)?),
            _ => Err(Error::UnsupportedFileType(ext.to_string())),
        }
    }

    /// Resolves the configured view names. Names are matched leniently (see
    /// [`ViewName`]'s `FromStr` implementation).
    pub fn view_names(&self) -> Result<Vec<ViewName>, Error> {
        self.views.iter().map(|name| name.parse()).collect()
    }

    /// Loads configuration from the given JSON or YAML file. Fields missing
    /// from the file take their default values.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Attempting to load config file: {}", path.display());
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| Error::CannotDetermineFileType(path.to_path_buf()))?;
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Io(format!("while trying to read from {}", path.display()), e))?;
        let config = Self::load_as(ext, &content)
            .wrap_err_with(|| Error::FailedToLoadConfig(path.to_path_buf()))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
