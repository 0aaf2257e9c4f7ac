use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::content::resolve_content_path;
use crate::error::FolioError;
use crate::facets::{StatusFacet, default_status_facets, normalize_status_facets};

/// Env var overriding the content path.
pub const CONTENT_ENV: &str = "FOLIO_CONTENT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub facets: FacetConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Content file, relative to the project root.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetConfig {
    #[serde(default = "default_status_facets")]
    pub statuses: Vec<StatusFacet>,
}

impl Default for FacetConfig {
    fn default() -> Self {
        Self {
            statuses: default_status_facets(),
        }
    }
}

impl FacetConfig {
    /// Configured statuses with the `all` sentinel guaranteed first.
    #[must_use]
    pub fn status_facets(&self) -> Vec<StatusFacet> {
        normalize_status_facets(self.statuses.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Tech badges shown per project card before collapsing into `+N`.
    #[serde(default = "default_tech_preview")]
    pub tech_preview: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tech_preview: default_tech_preview(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub content: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub content_path: PathBuf,
    pub resolved_output: String,
}

fn read_toml<T: serde::de::DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<T>(&content).map_err(|e| {
        FolioError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
        .into()
    })
}

/// Load `<root>/.folio/config.toml`, or defaults when it does not exist.
///
/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    read_toml(&project_root.join(".folio/config.toml"))
}

/// Load the per-user config from the platform config directory.
///
/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    read_toml(&config_dir.join("folio/config.toml"))
}

/// Combine flags, environment and both config files.
///
/// # Errors
///
/// Fails if either config file exists but cannot be parsed.
pub fn resolve_config(
    project_root: &Path,
    cli_content: Option<&Path>,
    cli_json: bool,
) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_content = env::var_os(CONTENT_ENV).map(PathBuf::from);
    let content_path = resolve_content(project_root, cli_content, env_content, &project, &user);

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(cli_json, user.output.clone(), env_format);

    Ok(EffectiveConfig {
        project,
        user,
        content_path,
        resolved_output,
    })
}

fn resolve_content(
    project_root: &Path,
    cli_content: Option<&Path>,
    env_content: Option<PathBuf>,
    project: &ProjectConfig,
    user: &UserConfig,
) -> PathBuf {
    let chosen = cli_content
        .map(Path::to_path_buf)
        .or(env_content)
        .or_else(|| project.content.path.clone())
        .or_else(|| user.content.clone())
        .unwrap_or_else(|| PathBuf::from(default_content_file()));
    resolve_content_path(project_root, &chosen)
}

fn resolve_output(cli_json: bool, user_output: Option<String>, env_format: Option<String>) -> String {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some("pretty"),
            "text" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return "json".to_string();
    }

    if let Some(mode) = env_format.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if let Some(mode) = user_output.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if std::io::stdout().is_terminal() {
        "pretty".to_string()
    } else {
        "text".to_string()
    }
}

const fn default_content_file() -> &'static str {
    "portfolio.json"
}

const fn default_tech_preview() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_project_config_uses_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert!(cfg.content.path.is_none());
        assert_eq!(cfg.display.tech_preview, 4);
        let statuses = cfg.facets.status_facets();
        assert_eq!(statuses.len(), 5);
        assert_eq!(statuses[0].value, "all");
        assert_eq!(statuses[0].label, "Tous");
    }

    #[test]
    fn project_config_overrides_statuses() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(root.path().join(".folio")).expect("create .folio");
        std::fs::write(
            root.path().join(".folio/config.toml"),
            r#"
[content]
path = "data/site.yaml"

[facets]
statuses = [
  { value = "Shipped", label = "Shipped" },
  { value = "Paused", label = "On hold" },
]

[display]
tech_preview = 2
"#,
        )
        .expect("write config");

        let cfg = load_project_config(root.path()).expect("load");
        assert_eq!(cfg.content.path, Some(PathBuf::from("data/site.yaml")));
        assert_eq!(cfg.display.tech_preview, 2);
        let values: Vec<String> = cfg
            .facets
            .status_facets()
            .into_iter()
            .map(|s| s.value)
            .collect();
        assert_eq!(values, vec!["all", "Shipped", "Paused"]);
    }

    #[test]
    fn invalid_project_config_is_config_parse_error() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(root.path().join(".folio")).expect("create .folio");
        std::fs::write(root.path().join(".folio/config.toml"), "[display\n").expect("write");

        let err = load_project_config(root.path()).expect_err("should fail");
        let folio = err.downcast_ref::<FolioError>().expect("FolioError inside");
        assert_eq!(folio.error_code().code(), "E1002");
    }

    #[test]
    fn content_precedence_cli_then_env_then_project_then_user() {
        let root = Path::new("/site");
        let mut project = ProjectConfig::default();
        project.content.path = Some(PathBuf::from("project.json"));
        let user = UserConfig {
            output: None,
            content: Some(PathBuf::from("/home/me/user.json")),
        };

        let p = resolve_content(
            root,
            Some(Path::new("cli.json")),
            Some(PathBuf::from("env.json")),
            &project,
            &user,
        );
        assert_eq!(p, PathBuf::from("/site/cli.json"));

        let p = resolve_content(root, None, Some(PathBuf::from("env.json")), &project, &user);
        assert_eq!(p, PathBuf::from("/site/env.json"));

        let p = resolve_content(root, None, None, &project, &user);
        assert_eq!(p, PathBuf::from("/site/project.json"));

        let p = resolve_content(root, None, None, &ProjectConfig::default(), &user);
        assert_eq!(p, PathBuf::from("/home/me/user.json"));

        let p = resolve_content(
            root,
            None,
            None,
            &ProjectConfig::default(),
            &UserConfig::default(),
        );
        assert_eq!(p, PathBuf::from("/site/portfolio.json"));
    }

    #[test]
    fn cli_json_overrides_env_and_config() {
        let output = resolve_output(true, Some("pretty".to_string()), Some("text".to_string()));
        assert_eq!(output, "json");
    }

    #[test]
    fn env_beats_user_config_and_unknown_values_fall_through() {
        let output = resolve_output(false, Some("json".to_string()), Some("TEXT".to_string()));
        assert_eq!(output, "text");

        let output = resolve_output(false, Some("json".to_string()), Some("fancy".to_string()));
        assert_eq!(output, "json");
    }

    #[test]
    fn user_config_parses() {
        let cfg: UserConfig = toml::from_str(
            r#"
output = "json"
content = "/home/me/portfolio.json"
"#,
        )
        .expect("parse");
        assert_eq!(cfg.output.as_deref(), Some("json"));
        assert_eq!(cfg.content, Some(PathBuf::from("/home/me/portfolio.json")));
    }
}
