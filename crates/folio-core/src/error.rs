use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ContentNotFound,
    ConfigParseError,
    ContentParseError,
    UnsupportedFormat,
    ProjectNotFound,
    InvalidExpandKey,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ContentNotFound => "E1001",
            Self::ConfigParseError => "E1002",
            Self::ContentParseError => "E1003",
            Self::UnsupportedFormat => "E1004",
            Self::ProjectNotFound => "E2001",
            Self::InvalidExpandKey => "E2002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ContentNotFound => "Portfolio content not found",
            Self::ConfigParseError => "Config file parse error",
            Self::ContentParseError => "Portfolio content is malformed",
            Self::UnsupportedFormat => "Unsupported content format",
            Self::ProjectNotFound => "Project not found",
            Self::InvalidExpandKey => "Invalid timeline key",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ContentNotFound => Some(
                "Pass --content <path>, set FOLIO_CONTENT, or add [content] path to .folio/config.toml.",
            ),
            Self::ConfigParseError => Some("Fix syntax in .folio/config.toml and retry."),
            Self::ContentParseError => {
                Some("Check the portfolio document against the documented field names.")
            }
            Self::UnsupportedFormat => Some("Use a .json, .yaml, or .yml content file."),
            Self::ProjectNotFound => None,
            Self::InvalidExpandKey => {
                Some("Use `experience:<id>` or `certification:<id>`, e.g. `experience:3`.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures of the loading and parsing edges around the core.
///
/// Filtering, timeline merge and expand toggling never produce one of these.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("portfolio content not found at {}", path.display())]
    ContentNotFound { path: PathBuf },

    #[error("failed to parse {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("failed to parse portfolio content {}: {message}", path.display())]
    ContentParse { path: PathBuf, message: String },

    #[error("unsupported content format for {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("no project with id {0}")]
    ProjectNotFound(u32),

    #[error("invalid timeline key '{input}': {reason}")]
    InvalidExpandKey { input: String, reason: &'static str },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FolioError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::ContentNotFound { .. } => ErrorCode::ContentNotFound,
            Self::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Self::ContentParse { .. } => ErrorCode::ContentParseError,
            Self::UnsupportedFormat { .. } => ErrorCode::UnsupportedFormat,
            Self::ProjectNotFound(_) => ErrorCode::ProjectNotFound,
            Self::InvalidExpandKey { .. } => ErrorCode::InvalidExpandKey,
            Self::Io { .. } => ErrorCode::InternalUnexpected,
        }
    }

    /// Remediation text, falling back to the code's summary when no hint exists.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.error_code();
        code.hint().unwrap_or_else(|| code.message()).to_string()
    }
}
