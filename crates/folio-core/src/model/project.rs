use serde::{Deserialize, Serialize};

/// Outbound links attached to a project card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
}

impl ProjectLinks {
    /// Returns true if the project has no link at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.github_url.is_none() && self.live_url.is_none()
    }
}

/// One entry of the project collection.
///
/// `tech_stack` is matched as a set; its stored order is only used for
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub links: ProjectLinks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl ProjectEntry {
    /// Returns true if `tech` appears in this project's stack.
    #[must_use]
    pub fn uses(&self, tech: &str) -> bool {
        self.tech_stack.iter().any(|t| t == tech)
    }

    /// Split the stack into the first `limit` entries and the hidden remainder count.
    #[must_use]
    pub fn tech_preview(&self, limit: usize) -> (&[String], usize) {
        let shown = self.tech_stack.len().min(limit);
        (&self.tech_stack[..shown], self.tech_stack.len() - shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProjectEntry {
        ProjectEntry {
            id: 1,
            title: "Atlas".into(),
            description: "Route planner".into(),
            tech_stack: vec![
                "React".into(),
                "Node".into(),
                "PostgreSQL".into(),
                "Docker".into(),
                "Redis".into(),
            ],
            status: "Déployé".into(),
            links: ProjectLinks::default(),
            image_url: None,
            highlights: vec![],
        }
    }

    #[test]
    fn uses_is_exact_match() {
        let p = sample();
        assert!(p.uses("React"));
        assert!(!p.uses("react"));
        assert!(!p.uses("Reac"));
    }

    #[test]
    fn tech_preview_reports_hidden_count() {
        let p = sample();
        let (shown, hidden) = p.tech_preview(4);
        assert_eq!(shown.len(), 4);
        assert_eq!(hidden, 1);

        let (shown, hidden) = p.tech_preview(10);
        assert_eq!(shown.len(), 5);
        assert_eq!(hidden, 0);
    }

    #[test]
    fn deserializes_camel_case_document() {
        let json = r#"{
            "id": 3,
            "title": "Ledger",
            "description": "Accounting",
            "techStack": ["Python", "FastAPI"],
            "status": "Open source",
            "githubUrl": "https://github.com/example/ledger",
            "imageUrl": "/img/ledger.png",
            "extraField": true
        }"#;
        let p: ProjectEntry = serde_json::from_str(json).expect("parse project");
        assert_eq!(p.id, 3);
        assert_eq!(p.tech_stack, vec!["Python", "FastAPI"]);
        assert_eq!(
            p.links.github_url.as_deref(),
            Some("https://github.com/example/ledger")
        );
        assert!(p.links.live_url.is_none());
        assert!(p.highlights.is_empty());
    }
}
