//! Dataset retrieval
//!
//! The dataset is a single CSV file. It can live on disk, behind a URL, or
//! be handed over as text (tests, embedded copies).

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Where the raw CSV comes from
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Local file
    File(PathBuf),
    /// http(s) URL
    Http(String),
    /// CSV text already in memory
    Inline(Arc<str>),
}

impl Source {
    /// Interpret a config value: URLs become `Http`, anything else a file path
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Http(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }

    pub fn inline(text: impl Into<Arc<str>>) -> Self {
        Self::Inline(text.into())
    }

    /// Local path, when the dataset is a file
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            Self::File(path) => Some(path),
            _ => None,
        }
    }

    /// Retrieve the full CSV text
    ///
    /// Every call reads the source again. Failures map to `DataFetch`.
    pub async fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            Self::File(path) => {
                debug!("Reading dataset from {}", path.display());
                tokio::fs::read(path).await.map_err(|e| {
                    Error::DataFetch(format!("Failed to read {}: {}", path.display(), e))
                })
            }
            Self::Http(url) => {
                debug!("Downloading dataset from {}", url);
                let response = reqwest::get(url)
                    .await
                    .map_err(|e| Error::DataFetch(format!("Request to {} failed: {}", url, e)))?;

                if !response.status().is_success() {
                    return Err(Error::DataFetch(format!(
                        "{} returned status: {}",
                        url,
                        response.status()
                    )));
                }

                response
                    .bytes()
                    .await
                    .map(|body| body.to_vec())
                    .map_err(|e| Error::DataFetch(format!("Failed to read body from {}: {}", url, e)))
            }
            Self::Inline(text) => Ok(text.as_bytes().to_vec()),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Http(url) => f.write_str(url),
            Self::Inline(text) => write!(f, "<inline, {} bytes>", text.len()),
        }
    }
}
