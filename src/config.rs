//! Configuration management and validation.
//!
//! Provides the institution/provenance configuration that is merged into every
//! converted record's global attributes. Values typically come from a small
//! JSON file maintained alongside the input data.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Institution and provenance metadata for converted records
///
/// Every field is optional; missing values are simply omitted from the output
/// attribute map, matching how the upstream archive treats absent metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Dataset title
    pub title: Option<String>,

    /// One-paragraph dataset summary
    pub summary: Option<String>,

    /// Originating institution (e.g. "Institute of Ocean Sciences")
    pub institution: Option<String>,

    /// Landing page for the dataset
    pub info_url: Option<String>,

    /// Free-text dataset description
    pub description: Option<String>,

    /// Comma-separated keyword list
    pub keywords: Option<String>,

    /// Vocabulary the keywords are drawn from
    pub keywords_vocabulary: Option<String>,

    /// Acknowledgement text
    pub acknowledgement: Option<String>,

    /// Free-text comment
    pub comment: Option<String>,

    /// Dataset creator contact details
    pub creator_name: Option<String>,
    pub creator_email: Option<String>,
    pub creator_url: Option<String>,

    /// Data license string
    pub license: Option<String>,

    /// Metadata conventions string (e.g. "CF-1.8")
    pub conventions: Option<String>,

    /// Processing level description
    pub processing_level: Option<String>,

    /// Controlled vocabulary for standard names (e.g. "CF Standard Name Table v79")
    pub standard_name_vocabulary: Option<String>,
}

impl ConversionConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read config '{}'", path.display()), e))?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::json(
                path.display().to_string(),
                "failed to parse conversion config",
                Some(e),
            )
        })?;

        config.validate()?;
        debug!("Loaded conversion config from {}", path.display());
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(email) = &self.creator_email {
            if !email.contains('@') {
                return Err(Error::configuration(format!(
                    "creator_email '{}' is not a valid email address",
                    email
                )));
            }
        }

        if let Some(url) = &self.creator_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::configuration(format!(
                    "creator_url '{}' must be an http(s) URL",
                    url
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = ConversionConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.title.is_none());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let config = ConversionConfig {
            creator_email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let config = ConversionConfig {
            creator_url: Some("ftp://example.org".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"title": "IOS CTD profiles", "institution": "Institute of Ocean Sciences",
                "creator_email": "datashop@example.ca"}}"#
        )
        .unwrap();

        let config = ConversionConfig::from_file(file.path()).unwrap();
        assert_eq!(config.title.as_deref(), Some("IOS CTD profiles"));
        assert_eq!(
            config.institution.as_deref(),
            Some("Institute of Ocean Sciences")
        );
        assert!(config.summary.is_none());
    }
}
