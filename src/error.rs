use std::fmt;

#[derive(Debug)]
pub enum HubError {
    /// Malformed or contradictory arguments.
    Usage(String),
    /// A precondition about repository or remote state does not hold.
    Domain(String),
    /// The hosted service answered with a non-success status.
    Http {
        action: Option<String>,
        status: u16,
        message: String,
        errors: Vec<String>,
    },
    /// The request never produced a response (DNS, TLS, proxy, ...).
    Transport(String),
    /// The wrapped executable could not be found.
    ToolNotFound(String),
    GitCliError {
        code: Option<i32>,
        stderr: String,
        args: Vec<String>,
    },
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    FromUtf8(std::string::FromUtf8Error),
    Generic(String),
}

impl HubError {
    /// Attach the action that was being attempted to an HTTP failure, e.g.
    /// "creating fork". Other variants pass through unchanged.
    pub fn during(self, what: &str) -> Self {
        match self {
            HubError::Http {
                status,
                message,
                errors,
                ..
            } => HubError::Http {
                action: Some(what.to_string()),
                status,
                message,
                errors,
            },
            HubError::Transport(message) => HubError::Transport(format!("{}: {}", what, message)),
            other => other,
        }
    }

    /// Extra guidance printed under the main error line.
    pub fn hints(&self) -> Vec<String> {
        match self {
            HubError::Http { status: 401, .. } => {
                vec!["Check your token configuration (`git config github.token`)".to_string()]
            }
            HubError::Http {
                status: 422,
                errors,
                ..
            } => errors.clone(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for HubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HubError::Usage(msg) => write!(f, "{}", msg),
            HubError::Domain(msg) => write!(f, "{}", msg),
            HubError::Http {
                action,
                status,
                message,
                ..
            } => match action {
                Some(action) => write!(f, "Error {}: {} (HTTP {})", action, message.trim(), status),
                None => write!(f, "Error: {} (HTTP {})", message.trim(), status),
            },
            HubError::Transport(msg) => write!(f, "Error: {}", msg),
            HubError::ToolNotFound(tool) => write!(f, "Error: `{}` command not found", tool),
            HubError::GitCliError { code, stderr, args } => match code {
                Some(c) => write!(
                    f,
                    "Git CLI ({}) failed with exit code {}: {}",
                    args.join(" "),
                    c,
                    stderr.trim()
                ),
                None => write!(f, "Git CLI ({}) failed: {}", args.join(" "), stderr.trim()),
            },
            HubError::IoError(e) => write!(f, "IO error: {}", e),
            HubError::JsonError(e) => write!(f, "JSON error: {}", e),
            HubError::FromUtf8(e) => write!(f, "UTF-8 error: {}", e),
            HubError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for HubError {}

impl From<std::io::Error> for HubError {
    fn from(err: std::io::Error) -> Self {
        HubError::IoError(err)
    }
}

impl From<serde_json::Error> for HubError {
    fn from(err: serde_json::Error) -> Self {
        HubError::JsonError(err)
    }
}

impl From<std::string::FromUtf8Error> for HubError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        HubError::FromUtf8(err)
    }
}
