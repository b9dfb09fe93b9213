use crate::repo_url::RepositoryReference;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub owner: RepositoryOwner,
    #[serde(default)]
    pub private: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestHead {
    /// `user:branch`
    pub label: String,
    #[serde(rename = "ref")]
    pub branch: String,
    /// Missing once the fork the pull request came from was deleted.
    pub repo: Option<RepositorySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    pub html_url: String,
    pub head: PullRequestHead,
}

impl PullRequest {
    /// Split the head label into `(user, branch)`.
    pub fn head_user_and_branch(&self) -> (&str, &str) {
        match self.head.label.split_once(':') {
            Some((user, branch)) => (user, branch),
            None => (&self.head.label, &self.head.branch),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub private: bool,
}

/// Body of a pull request creation. Either `title` or `issue` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRequest {
    pub project: RepositoryReference,
    pub base: String,
    /// `owner:branch`
    pub head: String,
    pub title: Option<String>,
    pub body: Option<String>,
    pub issue: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedPullRequest {
    pub html_url: String,
}

/// Error body returned by the v3 API.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ApiFieldError>,
}

#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct ApiFieldError {
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiFieldError {
    pub(crate) fn describe(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        match (&self.field, &self.code) {
            (Some(field), Some(code)) if code == "missing_field" => {
                format!("Missing field: \"{}\"", field)
            }
            (Some(field), Some(code)) if code == "invalid" => {
                format!("Invalid value for \"{}\"", field)
            }
            (Some(field), Some(code)) => format!("{} {}", field, code),
            (Some(field), None) => field.clone(),
            (None, Some(code)) => code.clone(),
            (None, None) => "unknown error".to_string(),
        }
    }
}
