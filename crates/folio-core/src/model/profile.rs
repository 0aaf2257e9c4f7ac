use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity block shown in the hero and footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub tagline: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Profile {
    #[must_use]
    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct About {
    pub paragraph1: String,
    pub paragraph2: String,
    pub paragraph3: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
}

impl About {
    /// Non-empty paragraphs in reading order.
    #[must_use]
    pub fn paragraphs(&self) -> Vec<&str> {
        [&self.paragraph1, &self.paragraph2, &self.paragraph3]
            .into_iter()
            .map(String::as_str)
            .filter(|p| !p.trim().is_empty())
            .collect()
    }
}

/// A headline number. Source documents use both `3` and `"3+"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(u64),
    Text(String),
}

impl Default for StatValue {
    fn default() -> Self {
        Self::Number(0)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub years_of_experience: StatValue,
    pub projects_completed: StatValue,
    pub projects_in_production: StatValue,
    pub technologies_mastered: StatValue,
}

impl Stats {
    /// Labelled rows in the fixed display order.
    #[must_use]
    pub fn rows(&self) -> [(&'static str, &StatValue); 4] {
        [
            ("Années d'expérience", &self.years_of_experience),
            ("Projets complétés", &self.projects_completed),
            ("En production", &self.projects_in_production),
            ("Technologies", &self.technologies_mastered),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

/// A skill group heading, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillCategory {
    pub key: &'static str,
    pub title: &'static str,
}

/// Categories rendered by the skills view. Keys missing from this list are
/// not shown.
pub const SKILL_CATEGORIES: [SkillCategory; 5] = [
    SkillCategory {
        key: "frontend",
        title: "Frontend",
    },
    SkillCategory {
        key: "backend",
        title: "Backend",
    },
    SkillCategory {
        key: "dataScienceAI",
        title: "Data Science & AI",
    },
    SkillCategory {
        key: "databases",
        title: "Bases de Données",
    },
    SkillCategory {
        key: "devOpsTools",
        title: "DevOps & Outils",
    },
];

/// Skills keyed by category key, as stored in the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skills(pub BTreeMap<String, Vec<Skill>>);

impl Skills {
    /// Each known category with its skills, in [`SKILL_CATEGORIES`] order.
    ///
    /// Categories with no entry in the document yield an empty slice.
    #[must_use]
    pub fn grouped(&self) -> Vec<(SkillCategory, &[Skill])> {
        SKILL_CATEGORIES
            .iter()
            .map(|cat| {
                let skills = self.0.get(cat.key).map_or(&[][..], Vec::as_slice);
                (*cat, skills)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_value_accepts_number_or_text() {
        let stats: Stats = serde_json::from_str(
            r#"{"yearsOfExperience": "3+", "projectsCompleted": 12}"#,
        )
        .expect("parse stats");
        assert_eq!(stats.years_of_experience.to_string(), "3+");
        assert_eq!(stats.projects_completed, StatValue::Number(12));
        assert_eq!(stats.technologies_mastered, StatValue::Number(0));
    }

    #[test]
    fn skills_grouped_follows_fixed_order_and_drops_unknown() {
        let skills: Skills = serde_json::from_str(
            r#"{
                "backend": [{"name": "Node.js", "icon": "nodejs"}],
                "frontend": [{"name": "React", "icon": "react"}],
                "misc": [{"name": "Knitting"}]
            }"#,
        )
        .expect("parse skills");

        let grouped = skills.grouped();
        let keys: Vec<&str> = grouped.iter().map(|(c, _)| c.key).collect();
        assert_eq!(
            keys,
            vec!["frontend", "backend", "dataScienceAI", "databases", "devOpsTools"]
        );
        assert_eq!(grouped[0].1[0].name, "React");
        assert_eq!(grouped[1].1[0].name, "Node.js");
        assert!(grouped[2].1.is_empty());
        assert!(
            grouped
                .iter()
                .flat_map(|(_, s)| s.iter())
                .all(|s| s.name != "Knitting")
        );
    }

    #[test]
    fn about_skips_blank_paragraphs() {
        let about = About {
            paragraph1: "First".into(),
            paragraph2: "  ".into(),
            paragraph3: "Third".into(),
            resume_url: None,
        };
        assert_eq!(about.paragraphs(), vec!["First", "Third"]);
    }

    #[test]
    fn full_name_handles_missing_parts() {
        let mut p = Profile {
            first_name: "Awa".into(),
            last_name: "Diallo".into(),
            ..Profile::default()
        };
        assert_eq!(p.full_name(), "Awa Diallo");
        p.last_name.clear();
        assert_eq!(p.full_name(), "Awa");
    }
}
