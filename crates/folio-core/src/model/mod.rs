//! Portfolio records as they appear in the source document.
//!
//! All records are immutable for the lifetime of a session.

pub mod career;
pub mod profile;
pub mod project;

pub use career::{CertificationEntry, ExperienceEntry};
pub use profile::{About, Contact, Profile, SKILL_CATEGORIES, Skill, SkillCategory, Skills, StatValue, Stats};
pub use project::{ProjectEntry, ProjectLinks};
