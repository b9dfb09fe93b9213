use crate::commands::context::Context;
use crate::error::HubError;
use crate::git::ArgumentList;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static PULL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(/pull/\d+)/\w*$").expect("pull suffix pattern is valid"));

/// Where a patch URL is downloaded to and what is actually fetched.
#[derive(Debug, PartialEq, Eq)]
struct PatchSource {
    url: String,
    file: PathBuf,
}

/// Normalize a pull request, commit or gist URL into its raw patch URL and
/// pick the local file name for it.
fn patch_source(url: &str, gist: bool, tmp_dir: &Path) -> PatchSource {
    let mut url = match url.split_once('#') {
        Some((base, _)) => base.to_string(),
        None => url.to_string(),
    };
    if !gist {
        url = PULL_SUFFIX.replace(&url, "$1").to_string();
    }
    let ext = if gist { ".txt" } else { ".patch" };
    if !url.ends_with(ext) {
        url.push_str(ext);
    }

    let basename = url.rsplit('/').next().unwrap_or_default();
    let prefix = if gist { "gist-" } else { "" };
    let file = tmp_dir.join(format!("{}{}", prefix, basename));
    PatchSource { url, file }
}

/// `am URL` and `apply URL`
pub fn apply(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    let found = args.tokens().iter().enumerate().skip(1).find_map(|(idx, token)| {
        ctx.hosted_host(token)
            .map(|host| (idx, token.clone(), host.starts_with("gist.")))
    });
    let Some((idx, url, gist)) = found else {
        return Ok(());
    };

    let source = patch_source(&url, gist, ctx.tmp_dir());
    if !args.is_dry_run() {
        ctx.hosted().download_patch(&source.url, &source.file)?;
    }
    args.set(idx, source.file.to_string_lossy());
    Ok(())
}
