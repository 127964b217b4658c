//! Body descriptor documents and the sources they are loaded from.
//!
//! A document is read from a primary source first. If that fails for any
//! reason the fallback source is tried; only when both fail does loading
//! give up with [`DataSourceError::Exhausted`].

pub mod descriptor;

use std::path::PathBuf;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

pub use descriptor::{
    parse_color, BodyDescriptor, ConfigurationError, RawBodyDescriptor, RawOrbit, RawRotation,
    DEFAULT_BODY_COLOR,
};

/// The built-in roster compiled into the binary.
pub const DEFAULT_ROSTER: &str = include_str!("../../assets/planet_data.json");

/// Where a user-supplied roster is looked for by default.
pub const USER_DATA_PATH: &str = "user/planet_data.json";

/// Errors raised while reading a descriptor document.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {label}: {source}")]
    Parse {
        label: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{label} has no celestialBodies list")]
    MissingBodies { label: String },

    #[error("no usable body data (primary: {primary}; fallback: {fallback})")]
    Exhausted {
        primary: Box<DataSourceError>,
        fallback: Box<DataSourceError>,
    },
}

/// A place a descriptor document can be read from.
#[derive(Clone, Debug, PartialEq)]
pub enum DataSource {
    /// A JSON file on disk
    File(PathBuf),
    /// A JSON document compiled into the binary
    Embedded(&'static str),
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Embedded(DEFAULT_ROSTER)
    }
}

impl DataSource {
    /// Short description for logs and the status line.
    pub fn label(&self) -> String {
        match self {
            DataSource::File(path) => path.display().to_string(),
            DataSource::Embedded(_) => "built-in roster".to_string(),
        }
    }

    /// Read and parse the document.
    pub fn read(&self) -> Result<Document, DataSourceError> {
        let label = self.label();
        let text = match self {
            DataSource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| DataSourceError::Io {
                    path: label.clone(),
                    source,
                })?
            }
            DataSource::Embedded(contents) => (*contents).to_string(),
        };
        Document::parse(&text, label)
    }
}

/// Top-level document shape. Entries stay untyped so each one can fail on
/// its own.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    version: Option<String>,
    celestial_bodies: Option<Vec<serde_json::Value>>,
}

/// A parsed descriptor document.
#[derive(Debug, Clone)]
pub struct Document {
    /// Where the document came from
    pub source: String,
    pub version: Option<String>,
    pub entries: Vec<serde_json::Value>,
}

impl Document {
    /// Parse JSON text; `label` names the source in errors.
    pub fn parse(text: &str, label: String) -> Result<Self, DataSourceError> {
        let raw: RawDocument = serde_json::from_str(text).map_err(|source| DataSourceError::Parse {
            label: label.clone(),
            source,
        })?;
        let entries = raw
            .celestial_bodies
            .ok_or_else(|| DataSourceError::MissingBodies {
                label: label.clone(),
            })?;
        Ok(Self {
            source: label,
            version: raw.version,
            entries,
        })
    }

    /// Validate every entry. Valid descriptors keep document order; each
    /// rejected entry yields one error and is logged.
    pub fn validate(&self) -> (Vec<BodyDescriptor>, Vec<ConfigurationError>) {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for (index, entry) in self.entries.iter().enumerate() {
            let result = serde_json::from_value::<RawBodyDescriptor>(entry.clone())
                .map_err(|err| ConfigurationError::Malformed {
                    index,
                    reason: err.to_string(),
                })
                .and_then(RawBodyDescriptor::validate);

            match result {
                Ok(descriptor) => accepted.push(descriptor),
                Err(err) => {
                    warn!("Skipping descriptor from {}: {}", self.source, err);
                    rejected.push(err);
                }
            }
        }

        (accepted, rejected)
    }
}

/// Outcome of [`load_document`].
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: Document,
    /// Whether the primary source failed and the fallback was used
    pub used_fallback: bool,
}

/// Read the primary source, falling back to the second one on any failure.
pub fn load_document(
    primary: &DataSource,
    fallback: &DataSource,
) -> Result<LoadedDocument, DataSourceError> {
    match primary.read() {
        Ok(document) => {
            info!(
                "Loaded {} body entries from {}",
                document.entries.len(),
                document.source
            );
            Ok(LoadedDocument {
                document,
                used_fallback: false,
            })
        }
        Err(primary_err) => {
            warn!("{primary_err}; falling back to {}", fallback.label());
            match fallback.read() {
                Ok(document) => Ok(LoadedDocument {
                    document,
                    used_fallback: true,
                }),
                Err(fallback_err) => Err(DataSourceError::Exhausted {
                    primary: Box::new(primary_err),
                    fallback: Box::new(fallback_err),
                }),
            }
        }
    }
}
