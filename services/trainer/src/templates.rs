//! Template store for the scenario pages
//!
//! Pages are plain HTML documents loaded once at startup. A missing
//! required template aborts startup rather than failing on first render.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Every page the scenario flows render
pub const REQUIRED_TEMPLATES: &[&str] = &[
    "index",
    "phishing_email",
    "fake_login",
    "phishing_result",
    "email_feedback",
    "ceo_fraud",
    "ceo_fraud_result",
    "tech_support",
    "tech_support_result",
    "fraud_payment",
    "fraud_payment_result",
    "social_media",
    "social_media_result",
];

/// Template loading error
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Missing template: {0}")]
    Missing(String),

    #[error("Failed to read template {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// In-memory store of the loaded scenario pages, keyed by template name
#[derive(Clone, Debug)]
pub struct TemplateStore {
    pages: HashMap<String, String>,
}

impl TemplateStore {
    /// Load every required template from `dir` (`<name>.html` files)
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let dir = dir.as_ref();
        let mut pages = HashMap::new();

        for name in REQUIRED_TEMPLATES {
            let path = dir.join(format!("{name}.html"));
            if !path.exists() {
                return Err(TemplateError::Missing(path.display().to_string()));
            }
            let body = fs::read_to_string(&path).map_err(|source| TemplateError::Read {
                name: (*name).to_string(),
                source,
            })?;
            pages.insert((*name).to_string(), body);
        }

        Ok(Self { pages })
    }

    /// Look up a loaded page by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pages.get(name).map(String::as_str)
    }
}
