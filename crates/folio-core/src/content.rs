//! Loading the portfolio document.
//!
//! The document is read once at startup and never mutated afterwards. JSON
//! and YAML are accepted, chosen by file extension.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::FolioError;
use crate::model::{
    About, CertificationEntry, Contact, ExperienceEntry, Profile, ProjectEntry, Skills, Stats,
};

/// Source document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Json,
    Yaml,
}

impl ContentFormat {
    /// Pick the format from `path`'s extension.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::UnsupportedFormat`] for any extension other than
    /// `json`, `yaml`, or `yml`.
    pub fn from_path(path: &Path) -> Result<Self, FolioError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(FolioError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// The whole portfolio. Every section defaults to empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioContent {
    pub profile: Profile,
    pub about: About,
    pub stats: Stats,
    pub experiences: Vec<ExperienceEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Skills,
    pub contact: Contact,
    pub interests: Vec<String>,
}

impl PortfolioContent {
    /// Parse a document held in memory.
    ///
    /// `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::ContentParse`] if the text is not a valid
    /// document in `format`.
    pub fn parse(text: &str, format: ContentFormat, origin: &Path) -> Result<Self, FolioError> {
        let parsed = match format {
            ContentFormat::Json => serde_json::from_str::<Self>(text).map_err(|e| e.to_string()),
            ContentFormat::Yaml => serde_yaml::from_str::<Self>(text).map_err(|e| e.to_string()),
        };
        let content = parsed.map_err(|message| FolioError::ContentParse {
            path: origin.to_path_buf(),
            message,
        })?;
        content.warn_on_duplicate_ids();
        Ok(content)
    }

    /// Read and parse the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::ContentNotFound`] if the file is missing,
    /// [`FolioError::UnsupportedFormat`] for unknown extensions,
    /// [`FolioError::Io`] on read failures and [`FolioError::ContentParse`]
    /// on malformed input.
    pub fn load(path: &Path) -> Result<Self, FolioError> {
        if !path.exists() {
            return Err(FolioError::ContentNotFound {
                path: path.to_path_buf(),
            });
        }
        let format = ContentFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|source| FolioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let content = Self::parse(&text, format, path)?;
        debug!(
            path = %path.display(),
            projects = content.projects.len(),
            experiences = content.experiences.len(),
            certifications = content.certifications.len(),
            "loaded portfolio content"
        );
        Ok(content)
    }

    /// Look up one project by id.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::ProjectNotFound`] if no project has `id`.
    pub fn project(&self, id: u32) -> Result<&ProjectEntry, FolioError> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or(FolioError::ProjectNotFound(id))
    }

    fn warn_on_duplicate_ids(&self) {
        let mut seen = BTreeSet::new();
        for project in &self.projects {
            if !seen.insert(project.id) {
                warn!(id = project.id, "duplicate project id in portfolio content");
            }
        }
    }
}

/// Resolve `path` against `root` unless it is already absolute.
#[must_use]
pub fn resolve_content_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
