use crate::utils::debug_log;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::OnceLock;

pub const DEFAULT_HOST: &str = "github.com";
pub const DEFAULT_GIT_CMD: &str = "git";

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Environment variables consumed by hub. Field names are the lowercased
/// variable names (`GITHUB_HOST` -> `github_host`).
#[derive(Debug, Clone, Default, Deserialize)]
struct EnvSettings {
    github_host: Option<String>,
    github_user: Option<String>,
    github_token: Option<String>,
    git: Option<String>,
    git_pager: Option<String>,
    pager: Option<String>,
    tmpdir: Option<String>,
    git_editor: Option<String>,
    visual: Option<String>,
    editor: Option<String>,
    browser: Option<String>,
    shell: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    env: EnvSettings,
    http_proxy: Option<String>,
    https_proxy: Option<String>,
}

impl Config {
    /// Process-wide configuration, read from the environment on first use.
    pub fn get() -> &'static Config {
        CONFIG.get_or_init(Config::from_env)
    }

    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars_os().filter_map(|(key, value)| {
            Some((key.into_string().ok()?, value.into_string().ok()?))
        }))
    }

    /// Build a configuration from explicit `(NAME, value)` pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: Vec<(String, String)> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let lookup = |names: &[&str]| {
            names.iter().find_map(|name| {
                vars.iter()
                    .find(|(k, v)| k == name && !v.is_empty())
                    .map(|(_, v)| v.clone())
            })
        };
        let http_proxy = lookup(&["HTTP_PROXY", "http_proxy"]);
        let https_proxy = lookup(&["HTTPS_PROXY", "https_proxy"]);
        let env = envy::from_iter::<_, EnvSettings>(
            vars.into_iter()
                .filter(|(k, _)| !k.eq_ignore_ascii_case("http_proxy"))
                .filter(|(k, _)| !k.eq_ignore_ascii_case("https_proxy")),
        )
        .unwrap_or_else(|e| {
            debug_log(&format!("failed to read environment settings: {}", e));
            EnvSettings::default()
        });

        Self {
            env,
            http_proxy,
            https_proxy,
        }
    }

    /// The wrapped executable.
    pub fn git_cmd(&self) -> &str {
        non_empty(&self.env.git).unwrap_or(DEFAULT_GIT_CMD)
    }

    pub fn host_override(&self) -> Option<&str> {
        non_empty(&self.env.github_host)
    }

    pub fn github_user(&self) -> Option<&str> {
        non_empty(&self.env.github_user)
    }

    pub fn github_token(&self) -> Option<&str> {
        non_empty(&self.env.github_token)
    }

    /// Pager command line. `None` means output should not be paged, which is
    /// what an explicitly empty `GIT_PAGER` or `cat` asks for.
    pub fn pager_command(&self) -> Option<String> {
        let pager = match (&self.env.git_pager, &self.env.pager) {
            (Some(git_pager), _) => git_pager.clone(),
            (None, Some(pager)) => pager.clone(),
            (None, None) => "less -R".to_string(),
        };
        let pager = pager.trim();
        if pager.is_empty() || pager == "cat" {
            None
        } else {
            Some(pager.to_string())
        }
    }

    pub fn tmp_dir(&self) -> PathBuf {
        non_empty(&self.env.tmpdir)
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
    }

    pub fn editor_command(&self) -> String {
        non_empty(&self.env.git_editor)
            .or_else(|| non_empty(&self.env.visual))
            .or_else(|| non_empty(&self.env.editor))
            .unwrap_or("vi")
            .to_string()
    }

    pub fn browser(&self) -> Option<&str> {
        non_empty(&self.env.browser)
    }

    pub fn shell(&self) -> Option<&str> {
        non_empty(&self.env.shell)
    }

    /// Proxy URL for requests made with the given URL scheme.
    pub fn proxy_for(&self, scheme: &str) -> Option<&str> {
        match scheme {
            "https" => self.https_proxy.as_deref().or(self.http_proxy.as_deref()),
            _ => self.http_proxy.as_deref(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
