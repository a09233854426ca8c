//! Resolve-or-absent asset lookup for logos, signatures and photos.
//!
//! A missing asset is `Ok(None)`; an asset that exists but cannot be read is
//! an error. Composers treat both as recoverable: missing degrades to the
//! "not available" placeholder, a read failure to the distinct load-error
//! placeholder. Neither aborts composition.

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use base64::Engine as _;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset {0}: {1}")]
    Io(String, #[source] std::io::Error),

    #[error("failed to fetch asset {0}: {1}")]
    Fetch(String, String),

    #[error("invalid data url: {0}")]
    DataUrl(String),
}

const LOGO_CANDIDATES: &[&str] = &["logo.png", "logo.jpg", "logo.jpeg"];

pub trait AssetResolver {
    /// Return the asset bytes, `Ok(None)` when the reference points nowhere.
    fn resolve(&self, reference: &str) -> Result<Option<Vec<u8>>, AssetError>;

    /// First existing logo among the fixed candidate filenames, if any.
    fn find_logo(&self) -> Option<Vec<u8>>;
}

/// Resolver over a base directory. `data:` URLs decode inline, `http(s)`
/// references fetch blocking, everything else reads from the filesystem.
pub struct FsAssetResolver {
    base_dir: PathBuf,
    http_timeout: Duration,
}

impl FsAssetResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            http_timeout: Duration::from_secs(10),
        }
    }

    fn resolve_data_url(&self, reference: &str) -> Result<Option<Vec<u8>>, AssetError> {
        let comma = reference
            .find(',')
            .ok_or_else(|| AssetError::DataUrl("missing payload separator".to_string()))?;
        let (meta, data) = reference.split_at(comma);
        if !meta.to_ascii_lowercase().contains(";base64") {
            return Err(AssetError::DataUrl("only base64 payloads supported".to_string()));
        }
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&data[1..])
            .map_err(|e| AssetError::DataUrl(e.to_string()))?;
        Ok(Some(bytes))
    }

    fn resolve_http(&self, reference: &str) -> Result<Option<Vec<u8>>, AssetError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.http_timeout)
            .build()
            .map_err(|e| AssetError::Fetch(reference.to_string(), e.to_string()))?;
        let response = client
            .get(reference)
            .send()
            .map_err(|e| AssetError::Fetch(reference.to_string(), e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AssetError::Fetch(
                reference.to_string(),
                format!("status {}", response.status()),
            ));
        }

        let mut bytes = Vec::new();
        response
            .take(32 * 1024 * 1024)
            .read_to_end(&mut bytes)
            .map_err(|e| AssetError::Io(reference.to_string(), e))?;
        Ok(Some(bytes))
    }

    fn resolve_file(&self, reference: &str) -> Result<Option<Vec<u8>>, AssetError> {
        let raw = PathBuf::from(reference);
        let path = if raw.is_absolute() {
            raw
        } else {
            self.base_dir.join(raw)
        };

        if !path.exists() {
            return Ok(None);
        }
        std::fs::read(&path)
            .map(Some)
            .map_err(|e| AssetError::Io(path.display().to_string(), e))
    }
}

impl AssetResolver for FsAssetResolver {
    fn resolve(&self, reference: &str) -> Result<Option<Vec<u8>>, AssetError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Ok(None);
        }

        let lower = reference.to_ascii_lowercase();
        if lower.starts_with("data:") {
            self.resolve_data_url(reference)
        } else if lower.starts_with("http://") || lower.starts_with("https://") {
            self.resolve_http(reference)
        } else {
            self.resolve_file(reference)
        }
    }

    fn find_logo(&self) -> Option<Vec<u8>> {
        for candidate in LOGO_CANDIDATES {
            match self.resolve_file(candidate) {
                Ok(Some(bytes)) => return Some(bytes),
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("logo candidate {candidate} unreadable: {e}");
                    continue;
                }
            }
        }
        None
    }
}
