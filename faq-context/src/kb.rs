//! Company knowledge base: typed record and its loader.
//!
//! The record is a single JSON document:
//!
//! ```json
//! {
//!   "name": "Acme", "founder": "...", "co_founders": ["..."],
//!   "mission": "...", "tagline": "...", "story": "...",
//!   "employees": [{ "name": "...", "role": "...", "expertise": "..." }],
//!   "mission_areas": [{ "title": "...", "description": "...", "technologies": ["..."] }],
//!   "contact": { "email": "...", "phone": "...", "address": "..." }
//! }
//! ```
//!
//! Every field is required; lists may be empty.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::DataUnavailable;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KnowledgeBase {
    pub name: String,
    pub founder: String,
    pub co_founders: Vec<String>,
    pub mission: String,
    pub tagline: String,
    pub story: String,
    pub employees: Vec<Employee>,
    pub mission_areas: Vec<MissionArea>,
    pub contact: Contact,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Employee {
    pub name: String,
    pub role: String,
    pub expertise: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MissionArea {
    /// Also used as the category label of the derived document.
    pub title: String,
    pub description: String,
    #[serde(alias = "items")]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl KnowledgeBase {
    /// Parses and validates a JSON record. `origin` names the source in errors.
    ///
    /// # Errors
    /// [`DataUnavailable::Malformed`] on bad JSON or missing fields,
    /// [`DataUnavailable::Invalid`] when [`KnowledgeBase::validate`] fails.
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, DataUnavailable> {
        let kb: KnowledgeBase =
            serde_json::from_str(json).map_err(|source| DataUnavailable::Malformed {
                origin: origin.to_string(),
                source,
            })?;
        kb.validate().map_err(|reason| DataUnavailable::Invalid {
            origin: origin.to_string(),
            reason,
        })?;
        Ok(kb)
    }

    /// Checks the fields every derived document and the fallback depend on.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("company name is empty".into());
        }
        if self.mission.trim().is_empty() {
            return Err("mission statement is empty".into());
        }
        if let Some(i) = self.employees.iter().position(|e| e.name.trim().is_empty()) {
            return Err(format!("employees[{i}].name is empty"));
        }
        if let Some(i) = self
            .mission_areas
            .iter()
            .position(|m| m.title.trim().is_empty())
        {
            return Err(format!("mission_areas[{i}].title is empty"));
        }
        Ok(())
    }
}

/// Where the knowledge base comes from.
///
/// Implementations must be deterministic: identical input yields an identical
/// [`KnowledgeBase`].
pub trait KnowledgeSource: Send + Sync {
    fn load(&self) -> Result<KnowledgeBase, DataUnavailable>;
}

/// Reads the knowledge base from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl KnowledgeSource for JsonFileSource {
    fn load(&self) -> Result<KnowledgeBase, DataUnavailable> {
        debug!(path = %self.path.display(), "reading knowledge base");
        let raw =
            std::fs::read_to_string(&self.path).map_err(|source| DataUnavailable::Unreadable {
                path: self.path.clone(),
                source,
            })?;
        let kb = KnowledgeBase::from_json_str(&raw, &self.path.display().to_string())?;
        info!(
            path = %self.path.display(),
            company = %kb.name,
            employees = kb.employees.len(),
            mission_areas = kb.mission_areas.len(),
            "knowledge base loaded"
        );
        Ok(kb)
    }
}
