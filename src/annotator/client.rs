use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Serialize;
use tracing::debug;

use super::{AnnotatedSentence, Annotator};
use crate::error::{AnnotatorError, InputError};
use crate::models::ParsedSentence;

/// Environment variable holding the annotation server URL
pub const ANNOTATOR_URL_VAR: &str = "SINGULAR_THEY_ANNOTATOR_URL";

/// Configuration for the HTTP annotation client
#[derive(Debug, Clone)]
pub struct AnnotatorConfig {
    /// Endpoint accepting `POST {"text": ...}`
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AnnotatorConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let url = std::env::var(ANNOTATOR_URL_VAR)
            .with_context(|| format!("{} environment variable not set", ANNOTATOR_URL_VAR))?;
        Ok(Self::new(url))
    }

    pub fn new(url: String) -> Self {
        Self { url, timeout_secs: 30 }
    }
}

#[derive(Serialize)]
struct AnnotateRequest<'a> {
    text: &'a str,
}

/// Client for a parser/coreference model served over HTTP
pub struct HttpAnnotator {
    client: Client,
    config: AnnotatorConfig,
}

impl HttpAnnotator {
    pub fn new(config: AnnotatorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build annotator HTTP client")?;
        Ok(Self { client, config })
    }

    fn request(&self, text: &str) -> Result<AnnotatedSentence, AnnotatorError> {
        let response = self
            .client
            .post(&self.config.url)
            .json(&AnnotateRequest { text })
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(AnnotatorError::Status { status, body });
        }

        Ok(response.json()?)
    }
}

impl Annotator for HttpAnnotator {
    fn annotate(&self, text: &str) -> Result<ParsedSentence, InputError> {
        debug!("Requesting parse for {:?}", text);
        self.request(text)?.into_sentence()
    }
}
