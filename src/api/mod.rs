pub mod client;
pub mod types;

pub use client::{ApiClient, Credentials, api_base_url};
pub use types::*;

use crate::error::HubError;
use crate::repo_url::RepositoryReference;
use std::path::Path;

/// The calls rewrite rules make against the hosted service.
pub trait HostedService {
    fn project_exists(&self, project: &RepositoryReference) -> Result<bool, HubError>;
    fn fetch_pull_request(
        &self,
        project: &RepositoryReference,
        id: &str,
    ) -> Result<PullRequest, HubError>;
    fn fork_project(&self, project: &RepositoryReference) -> Result<(), HubError>;
    fn create_project(
        &self,
        project: &RepositoryReference,
        options: &CreateOptions,
    ) -> Result<(), HubError>;
    fn create_pull_request(
        &self,
        request: &PullRequestRequest,
    ) -> Result<CreatedPullRequest, HubError>;
    /// Save the body of `url` to `destination`.
    fn download_patch(&self, url: &str, destination: &Path) -> Result<(), HubError>;
}
