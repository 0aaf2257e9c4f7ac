pub mod completions;
pub mod explore;
pub mod facets;
pub mod profile;
pub mod project;
pub mod projects;
pub mod skills;
pub mod timeline;

use folio_core::PortfolioContent;
use folio_core::config::EffectiveConfig;
use folio_core::facets::StatusFacet;

/// Loaded content plus the display settings every command needs.
#[derive(Debug)]
pub struct Portfolio {
    pub content: PortfolioContent,
    pub statuses: Vec<StatusFacet>,
    pub tech_preview: usize,
}

impl Portfolio {
    /// Load the document named by the effective config.
    ///
    /// # Errors
    ///
    /// Returns an error if the content file is missing or malformed.
    pub fn open(config: &EffectiveConfig) -> anyhow::Result<Self> {
        let content = PortfolioContent::load(&config.content_path)?;
        Ok(Self {
            content,
            statuses: config.project.facets.status_facets(),
            tech_preview: config.project.display.tech_preview,
        })
    }

    #[cfg(test)]
    pub fn from_content(content: PortfolioContent) -> Self {
        Self {
            content,
            statuses: folio_core::facets::default_status_facets(),
            tech_preview: 4,
        }
    }
}
