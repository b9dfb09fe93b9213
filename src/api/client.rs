use crate::api::types::{
    ApiErrorBody, ApiFieldError, CreateOptions, CreatedPullRequest, PullRequest,
    PullRequestRequest,
};
use crate::api::HostedService;
use crate::config::Config;
use crate::error::HubError;
use crate::repo_url::RepositoryReference;
use crate::utils::debug_log;
use once_cell::unsync::OnceCell;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = concat!("hub/", env!("CARGO_PKG_VERSION"));
const TIMEOUT_SECS: u64 = 60;

/// Who the client authenticates as. Resolved lazily because most
/// invocations never talk to the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub user: Option<String>,
    pub token: Option<String>,
}

/// Base URL of the v3 API for a host: the public service lives on a
/// separate `api.` host, enterprise installs under `/api/v3`.
pub fn api_base_url(host: &str) -> String {
    if host.eq_ignore_ascii_case(crate::config::DEFAULT_HOST) {
        "https://api.github.com".to_string()
    } else {
        format!("https://{}/api/v3", host)
    }
}

/// Blocking [`HostedService`] implementation on top of `ureq`.
pub struct ApiClient<'a> {
    config: &'a Config,
    credentials: Box<dyn Fn() -> Credentials + 'a>,
    resolved: OnceCell<Credentials>,
    agent: OnceCell<ureq::Agent>,
}

impl<'a> ApiClient<'a> {
    pub fn new(config: &'a Config, credentials: impl Fn() -> Credentials + 'a) -> Self {
        Self {
            config,
            credentials: Box::new(credentials),
            resolved: OnceCell::new(),
            agent: OnceCell::new(),
        }
    }

    fn credentials(&self) -> &Credentials {
        self.resolved.get_or_init(|| (self.credentials)())
    }

    fn agent(&self) -> Result<&ureq::Agent, HubError> {
        self.agent.get_or_try_init(|| {
            let connector = native_tls::TlsConnector::new()
                .map_err(|e| HubError::Transport(format!("TLS setup failed: {}", e)))?;
            let mut builder = ureq::AgentBuilder::new()
                .tls_connector(Arc::new(connector))
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(TIMEOUT_SECS));
            if let Some(proxy) = self.config.proxy_for("https") {
                debug_log(&format!("using proxy {}", proxy));
                let proxy = ureq::Proxy::new(proxy)
                    .map_err(|e| HubError::Transport(format!("invalid proxy {}: {}", proxy, e)))?;
                builder = builder.proxy(proxy);
            }
            Ok(builder.build())
        })
    }

    fn request(&self, method: &str, host: &str, path: &str) -> Result<ureq::Request, HubError> {
        let url = format!("{}{}", api_base_url(host), path);
        debug_log(&format!("{} {}", method, url));
        let mut request = self
            .agent()?
            .request(method, &url)
            .set("Accept", "application/vnd.github.v3+json");
        if let Some(token) = &self.credentials().token {
            request = request.set("Authorization", &format!("token {}", token));
        }
        Ok(request)
    }

    fn authenticated_user(&self) -> Result<&str, HubError> {
        self.credentials().user.as_deref().ok_or_else(|| {
            HubError::Domain(
                "** No GitHub user set. See http://help.github.com/set-your-user-name-email-and-github-token/"
                    .to_string(),
            )
        })
    }
}

/// Turn a `ureq` failure into a [`HubError`], reading the JSON error body
/// of non-success responses.
fn map_error(error: ureq::Error) -> HubError {
    match error {
        ureq::Error::Status(status, response) => {
            let status_text = response.status_text().to_string();
            let body = response.into_string().unwrap_or_default();
            error_from_body(status, &status_text, &body)
        }
        ureq::Error::Transport(transport) => HubError::Transport(transport.to_string()),
    }
}

fn error_from_body(status: u16, status_text: &str, body: &str) -> HubError {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = if parsed.message.is_empty() {
        status_text.to_string()
    } else {
        parsed.message
    };
    HubError::Http {
        action: None,
        status,
        message,
        errors: parsed.errors.iter().map(ApiFieldError::describe).collect(),
    }
}

fn build_create_body(name: &str, options: &CreateOptions) -> serde_json::Value {
    let mut body = serde_json::json!({
        "name": name,
        "private": options.private,
    });
    if let Some(description) = &options.description {
        body["description"] = serde_json::Value::String(description.clone());
    }
    if let Some(homepage) = &options.homepage {
        body["homepage"] = serde_json::Value::String(homepage.clone());
    }
    body
}

fn build_pull_request_body(request: &PullRequestRequest) -> serde_json::Value {
    let mut body = serde_json::json!({
        "base": request.base,
        "head": request.head,
    });
    match (&request.issue, &request.title) {
        (Some(issue), _) => {
            body["issue"] = serde_json::Value::String(issue.clone());
        }
        (None, title) => {
            body["title"] = serde_json::Value::String(title.clone().unwrap_or_default());
            if let Some(text) = &request.body {
                body["body"] = serde_json::Value::String(text.clone());
            }
        }
    }
    body
}

impl HostedService for ApiClient<'_> {
    fn project_exists(&self, project: &RepositoryReference) -> Result<bool, HubError> {
        let path = format!("/repos/{}", project.name_with_owner());
        match self.request("GET", &project.host, &path)?.call() {
            Ok(_) => Ok(true),
            Err(ureq::Error::Status(404, _)) => Ok(false),
            Err(e) => Err(map_error(e)),
        }
    }

    fn fetch_pull_request(
        &self,
        project: &RepositoryReference,
        id: &str,
    ) -> Result<PullRequest, HubError> {
        let path = format!("/repos/{}/pulls/{}", project.name_with_owner(), id);
        let response = self
            .request("GET", &project.host, &path)?
            .call()
            .map_err(map_error)
            .map_err(|e| e.during("fetching pull request"))?;
        Ok(response.into_json()?)
    }

    fn fork_project(&self, project: &RepositoryReference) -> Result<(), HubError> {
        let path = format!("/repos/{}/forks", project.name_with_owner());
        self.request("POST", &project.host, &path)?
            .send_json(serde_json::json!({}))
            .map_err(map_error)
            .map_err(|e| e.during("creating fork"))?;
        Ok(())
    }

    fn create_project(
        &self,
        project: &RepositoryReference,
        options: &CreateOptions,
    ) -> Result<(), HubError> {
        let path = if project.owner == self.authenticated_user()? {
            "/user/repos".to_string()
        } else {
            format!("/orgs/{}/repos", project.owner)
        };
        self.request("POST", &project.host, &path)?
            .send_json(build_create_body(&project.name, options))
            .map_err(map_error)
            .map_err(|e| e.during("creating repository"))?;
        Ok(())
    }

    fn create_pull_request(
        &self,
        request: &PullRequestRequest,
    ) -> Result<CreatedPullRequest, HubError> {
        let path = format!("/repos/{}/pulls", request.project.name_with_owner());
        let response = self
            .request("POST", &request.project.host, &path)?
            .send_json(build_pull_request_body(request))
            .map_err(map_error)
            .map_err(|e| e.during("creating pull request"))?;
        Ok(response.into_json()?)
    }

    fn download_patch(&self, url: &str, destination: &Path) -> Result<(), HubError> {
        debug_log(&format!("downloading {} to {}", url, destination.display()));
        let response = self
            .agent()?
            .get(url)
            .call()
            .map_err(map_error)
            .map_err(|e| e.during("downloading patch"))?;
        let mut file = std::fs::File::create(destination)?;
        std::io::copy(&mut response.into_reader(), &mut file)?;
        Ok(())
    }
}
