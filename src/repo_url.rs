//! Recognition of repository shorthand and hosted-service URLs, and
//! construction of remote and web URLs from a [`RepositoryReference`].
//!
//! Every rewrite rule goes through the grammars defined here so there is one
//! notion of "valid shorthand" for the whole program.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Account names: letters, digits and dashes.
pub const OWNER_PATTERN: &str = r"[a-zA-Z0-9-]+";
/// Repository names: word characters, dots and dashes.
pub const NAME_PATTERN: &str = r"[\w.-]+";

static OWNER_RE: Lazy<Regex> = Lazy::new(|| anchored(OWNER_PATTERN));
static NAME_RE: Lazy<Regex> = Lazy::new(|| anchored(NAME_PATTERN));
static OWNER_AND_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^({})/({})$", OWNER_PATTERN, NAME_PATTERN))
        .expect("owner/name pattern is valid")
});
static NAME_WITH_OWNER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^(?:{}|{}/{})$", NAME_PATTERN, OWNER_PATTERN, NAME_PATTERN))
        .expect("name-with-owner pattern is valid")
});
static OWNER_AT_SHA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^({})@([a-f0-9]{{7,40}})$", OWNER_PATTERN))
        .expect("owner@sha pattern is valid")
});
static SCP_REMOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[^@/]+@)?([^:/]+):/?([^/]+)/([^/]+?)(?:\.git)?/?$")
        .expect("scp-like remote pattern is valid")
});

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^{}$", pattern)).expect("grammar pattern is valid")
}

pub fn is_owner(token: &str) -> bool {
    OWNER_RE.is_match(token)
}

pub fn is_name(token: &str) -> bool {
    NAME_RE.is_match(token)
}

/// `name` or `owner/name`.
pub fn is_name_with_owner(token: &str) -> bool {
    NAME_WITH_OWNER_RE.is_match(token)
}

/// Split `owner/name` into its parts.
pub fn split_owner_and_name(token: &str) -> Option<(&str, &str)> {
    let caps = OWNER_AND_NAME_RE.captures(token)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Split the `owner@sha` commit shorthand.
pub fn split_owner_at_sha(token: &str) -> Option<(&str, &str)> {
    let caps = OWNER_AT_SHA_RE.captures(token)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryReference {
    pub owner: String,
    pub name: String,
    pub host: String,
}

impl RepositoryReference {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            host: host.into(),
        }
    }

    pub fn name_with_owner(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Local remote name used when a remote is added for this project.
    pub fn remote_slug(&self) -> &str {
        &self.owner
    }

    /// The same repository name under another account, e.g. a fork.
    pub fn owned_by(&self, owner: &str) -> Self {
        Self {
            owner: owner.to_string(),
            ..self.clone()
        }
    }

    pub fn git_url(&self, options: UrlOptions) -> String {
        build_remote_url(self, options)
    }

    /// Web URL of the project, with an optional path such as `/issues`.
    ///
    /// Wiki repositories (`name.wiki`) map onto the project's wiki pages:
    /// `/commits/...` becomes `/wiki/_history` and other paths get an
    /// underscore prefix (`/wiki/_pages`).
    pub fn web_url(&self, path: Option<&str>) -> String {
        let mut project_name = self.name_with_owner();
        let mut path = path.unwrap_or("").to_string();

        if let Some(stripped) = project_name.strip_suffix(".wiki") {
            project_name = stripped.to_string();
            if path != "/wiki" {
                let wiki_path = if path.starts_with("/commits/") {
                    "/_history".to_string()
                } else {
                    underscore_first_word(&path)
                };
                path = format!("/wiki{}", wiki_path);
            }
        }

        format!("https://{}/{}{}", self.host, project_name, path)
    }
}

fn underscore_first_word(path: &str) -> String {
    match path.find(|c: char| c.is_alphanumeric() || c == '_') {
        Some(idx) => format!("{}_{}", &path[..idx], &path[idx..]),
        None => path.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlOptions {
    pub private: bool,
    pub https: bool,
}

impl UrlOptions {
    pub fn new(private: bool, https: bool) -> Self {
        Self { private, https }
    }
}

/// Clone URL for a repository.
///
/// HTTPS wins over the private (SSH) form; without either the read-only git
/// protocol is used. `.git` is always appended.
pub fn build_remote_url(reference: &RepositoryReference, options: UrlOptions) -> String {
    let prefix = if options.https {
        format!("https://{}/", reference.host)
    } else if options.private {
        format!("git@{}:", reference.host)
    } else {
        format!("git://{}/", reference.host)
    };
    format!("{}{}.git", prefix, reference.name_with_owner())
}

/// What a bare command-line token refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shorthand {
    /// `owner/name`
    OwnerAndName { owner: String, name: String },
    /// A token that is a valid account name. Used to guess remote names.
    Owner(String),
    /// A repository name without an owner. The caller supplies the owner,
    /// normally the authenticated user.
    Name(String),
}

/// Match a token against the shorthand grammars, in priority order.
///
/// Returns `None` for anything outside the grammars, and for tokens naming an
/// existing local directory so clone targets and paths are never clobbered.
pub fn parse_shorthand(token: &str, is_dir: impl Fn(&str) -> bool) -> Option<Shorthand> {
    if !is_name_with_owner(token) || is_dir(token) {
        return None;
    }

    if let Some((owner, name)) = split_owner_and_name(token) {
        return Some(Shorthand::OwnerAndName {
            owner: owner.to_string(),
            name: name.to_string(),
        });
    }
    if is_owner(token) {
        return Some(Shorthand::Owner(token.to_string()));
    }
    Some(Shorthand::Name(token.to_string()))
}

/// A URL on the hosted service, split into project and sub-path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHostedUrl {
    pub host: String,
    pub owner: String,
    pub name: String,
    /// Everything after `owner/repo/`, e.g. `pull/42` or `commit/abc1234`.
    pub project_path: Option<String>,
}

impl ParsedHostedUrl {
    pub fn project(&self) -> RepositoryReference {
        RepositoryReference::new(&self.owner, &self.name, &self.host)
    }

    pub fn pull_request_id(&self) -> Option<&str> {
        self.numbered_path("pull/")
    }

    pub fn issue_id(&self) -> Option<&str> {
        self.numbered_path("issues/")
    }

    pub fn commit_sha(&self) -> Option<&str> {
        let rest = self.project_path.as_deref()?.strip_prefix("commit/")?;
        let len = rest
            .chars()
            .take_while(|c| matches!(c, 'a'..='f' | '0'..='9'))
            .count();
        (7..=40).contains(&len).then(|| &rest[..len])
    }

    fn numbered_path(&self, prefix: &str) -> Option<&str> {
        let rest = self.project_path.as_deref()?.strip_prefix(prefix)?;
        let len = rest.chars().take_while(char::is_ascii_digit).count();
        (len > 0).then(|| &rest[..len])
    }
}

/// An absolute `http(s)` URL whose host is one of `known_hosts`.
fn known_url(text: &str, known_hosts: &[String]) -> Option<(Url, String)> {
    if !(text.starts_with("http://") || text.starts_with("https://")) {
        return None;
    }
    let url = Url::parse(text).ok()?;
    let host = url.host_str()?.to_string();
    known_hosts
        .iter()
        .any(|known| known.eq_ignore_ascii_case(&host))
        .then_some((url, host))
}

/// Host of a URL on one of `known_hosts`, for URLs that need not name a
/// project (`https://gist.github.com/8da7fb5`).
pub fn hosted_url_host(text: &str, known_hosts: &[String]) -> Option<String> {
    known_url(text, known_hosts).map(|(_, host)| host)
}

/// Parse an absolute `http(s)` URL pointing at one of `known_hosts`.
pub fn parse_hosted_url(text: &str, known_hosts: &[String]) -> Option<ParsedHostedUrl> {
    let (url, host) = known_url(text, known_hosts)?;

    let mut parts = url.path().trim_start_matches('/').splitn(3, '/');
    let owner = parts.next().filter(|p| !p.is_empty())?;
    let name = parts.next().filter(|p| !p.is_empty())?;
    let project_path = parts.next().filter(|p| !p.is_empty()).map(str::to_string);

    Some(ParsedHostedUrl {
        host,
        owner: owner.to_string(),
        name: name.strip_suffix(".git").unwrap_or(name).to_string(),
        project_path,
    })
}

/// Percent-encode a ref name for use in a URL path. `/` separators are kept.
pub fn escape_ref_path(name: &str) -> String {
    let Ok(mut url) = Url::parse("https://localhost/") else {
        return name.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().extend(name.split('/'));
    }
    url.path().trim_start_matches('/').to_string()
}

/// Hosts whose URLs are treated as hosted-service URLs: the main host and
/// its gist subdomain.
pub fn known_hosts(main_host: &str) -> Vec<String> {
    vec![main_host.to_string(), format!("gist.{}", main_host)]
}

/// Recover the project a configured remote points at.
///
/// Understands `git@host:owner/name.git`, `git://host/owner/name.git`,
/// `https://host/owner/name(.git)` and `ssh://git@host/owner/name.git`.
pub fn parse_remote_url(remote_url: &str, known_hosts: &[String]) -> Option<RepositoryReference> {
    let (host, owner, name) = if remote_url.contains("://") {
        let url = Url::parse(remote_url).ok()?;
        let host = url.host_str()?.to_string();
        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
        let owner = segments.next()?.to_string();
        let name = segments.next()?.to_string();
        if segments.next().is_some() {
            return None;
        }
        (host, owner, name)
    } else {
        let caps = SCP_REMOTE_RE.captures(remote_url)?;
        (
            caps.get(1)?.as_str().to_string(),
            caps.get(2)?.as_str().to_string(),
            caps.get(3)?.as_str().to_string(),
        )
    };

    if !known_hosts.iter().any(|known| known.eq_ignore_ascii_case(&host)) {
        return None;
    }
    let name = name.strip_suffix(".git").unwrap_or(&name).to_string();
    Some(RepositoryReference::new(owner, name, host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn hosts() -> Vec<String> {
        known_hosts("github.com")
    }

    fn no_dirs(_: &str) -> bool {
        false
    }

    #[rstest]
    #[case("rtomayko/tilt", true)]
    #[case("tilt", true)]
    #[case("hub.rb", true)]
    #[case("my-org/some_repo.js", true)]
    #[case("a/b/c", false)]
    #[case("git://github.com/a/b.git", false)]
    #[case("under_score/repo", false)]
    #[case("", false)]
    fn name_with_owner_grammar(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_name_with_owner(token), expected);
    }

    #[test]
    fn shorthand_priority_order() {
        assert_eq!(
            parse_shorthand("rtomayko/tilt", no_dirs),
            Some(Shorthand::OwnerAndName {
                owner: "rtomayko".to_string(),
                name: "tilt".to_string()
            })
        );
        assert_eq!(
            parse_shorthand("mojombo", no_dirs),
            Some(Shorthand::Owner("mojombo".to_string()))
        );
        assert_eq!(
            parse_shorthand("hub.rb", no_dirs),
            Some(Shorthand::Name("hub.rb".to_string()))
        );
        assert_eq!(parse_shorthand("https://github.com/a/b", no_dirs), None);
    }

    #[test]
    fn shorthand_skips_existing_directories() {
        assert_eq!(parse_shorthand("rtomayko/tilt", |p| p == "rtomayko/tilt"), None);
    }

    #[test]
    fn ref_paths_are_escaped_except_separators() {
        assert_eq!(escape_ref_path("feature/x"), "feature/x");
        assert_eq!(escape_ref_path("fix#12"), "fix%2312");
        assert_eq!(escape_ref_path("what?/100%"), "what%3F/100%25");
        assert_eq!(escape_ref_path("caf\u{e9}"), "caf%C3%A9");
    }

    #[test]
    fn hosted_url_host_accepts_projectless_paths() {
        let hosts = known_hosts("github.com");
        assert_eq!(
            hosted_url_host("https://gist.github.com/8da7fb575debd88c54cf", &hosts).as_deref(),
            Some("gist.github.com")
        );
        assert_eq!(
            parse_hosted_url("https://gist.github.com/8da7fb575debd88c54cf", &hosts),
            None
        );
        assert_eq!(hosted_url_host("https://example.com/a/b", &hosts), None);
        assert_eq!(hosted_url_host("git@github.com:a/b.git", &hosts), None);
    }

    #[rstest]
    #[case(UrlOptions::new(false, false), "git://github.com/defunkt/hub.git")]
    #[case(UrlOptions::new(false, true), "https://github.com/defunkt/hub.git")]
    #[case(UrlOptions::new(true, false), "git@github.com:defunkt/hub.git")]
    #[case(UrlOptions::new(true, true), "https://github.com/defunkt/hub.git")]
    fn remote_url_forms(#[case] options: UrlOptions, #[case] expected: &str) {
        let reference = RepositoryReference::new("defunkt", "hub", "github.com");
        assert_eq!(build_remote_url(&reference, options), expected);
    }

    #[test]
    fn hosted_url_extracts_project_path() {
        let parsed = parse_hosted_url("https://github.com/defunkt/hub/pull/73", &hosts()).unwrap();
        assert_eq!(parsed.owner, "defunkt");
        assert_eq!(parsed.name, "hub");
        assert_eq!(parsed.project_path.as_deref(), Some("pull/73"));
        assert_eq!(parsed.pull_request_id(), Some("73"));
        assert_eq!(parsed.issue_id(), None);
    }

    #[test]
    fn hosted_url_commit_sha() {
        let parsed =
            parse_hosted_url("http://github.com/mislav/hub/commit/a319d88#comments", &hosts())
                .unwrap();
        assert_eq!(parsed.commit_sha(), Some("a319d88"));

        let short = parse_hosted_url("https://github.com/mislav/hub/commit/abc12", &hosts()).unwrap();
        assert_eq!(short.commit_sha(), None);
    }

    #[test]
    fn hosted_url_rejects_other_hosts_and_schemes() {
        assert!(parse_hosted_url("https://gitlab.com/a/b/pull/1", &hosts()).is_none());
        assert!(parse_hosted_url("git://github.com/a/b.git", &hosts()).is_none());
        assert!(parse_hosted_url("https://github.com/onlyowner", &hosts()).is_none());
        assert!(parse_hosted_url("https://gist.github.com/8da7fb575debd88c54cf", &hosts()).is_none());
    }

    #[test]
    fn hosted_url_strips_git_suffix() {
        let parsed = parse_hosted_url("https://github.com/defunkt/hub.git", &hosts()).unwrap();
        assert_eq!(parsed.name, "hub");
        assert_eq!(parsed.project_path, None);
    }

    #[rstest]
    #[case("git@github.com:defunkt/hub.git")]
    #[case("git://github.com/defunkt/hub.git")]
    #[case("https://github.com/defunkt/hub")]
    #[case("https://github.com/defunkt/hub.git")]
    #[case("ssh://git@github.com/defunkt/hub.git")]
    fn remote_urls_resolve_to_project(#[case] remote: &str) {
        let reference = parse_remote_url(remote, &hosts()).unwrap();
        assert_eq!(reference, RepositoryReference::new("defunkt", "hub", "github.com"));
    }

    #[test]
    fn remote_urls_on_unknown_hosts_are_ignored() {
        assert!(parse_remote_url("git@gitlab.com:defunkt/hub.git", &hosts()).is_none());
        assert!(parse_remote_url("/srv/git/hub.git", &hosts()).is_none());
    }

    #[test]
    fn owner_at_sha_shorthand() {
        assert_eq!(split_owner_at_sha("mislav@a319d88"), Some(("mislav", "a319d88")));
        assert_eq!(split_owner_at_sha("mislav@xyz1234"), None);
    }

    #[test]
    fn web_urls() {
        let project = RepositoryReference::new("defunkt", "hub", "github.com");
        assert_eq!(project.web_url(None), "https://github.com/defunkt/hub");
        assert_eq!(
            project.web_url(Some("/issues")),
            "https://github.com/defunkt/hub/issues"
        );

        let wiki = RepositoryReference::new("defunkt", "hub.wiki", "github.com");
        assert_eq!(wiki.web_url(None), "https://github.com/defunkt/hub/wiki");
        assert_eq!(
            wiki.web_url(Some("/commits/master")),
            "https://github.com/defunkt/hub/wiki/_history"
        );
        assert_eq!(
            wiki.web_url(Some("/pages")),
            "https://github.com/defunkt/hub/wiki/_pages"
        );
        assert_eq!(
            wiki.web_url(Some("/wiki")),
            "https://github.com/defunkt/hub/wiki"
        );
    }
}
