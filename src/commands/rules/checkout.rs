use crate::api::PullRequest;
use crate::commands::context::Context;
use crate::error::HubError;
use crate::git::ArgumentList;
use crate::repo_url::ParsedHostedUrl;

/// Pull request referenced by a URL token, with its head split apart.
struct PullHead {
    id: String,
    url: ParsedHostedUrl,
    pull: PullRequest,
    user: String,
    branch: String,
}

fn resolve_pull(ctx: &Context, token: &str) -> Result<Option<PullHead>, HubError> {
    let Some(url) = ctx.parse_url(token) else {
        return Ok(None);
    };
    let Some(id) = url.pull_request_id().map(str::to_string) else {
        return Ok(None);
    };

    let pull = ctx.hosted().fetch_pull_request(&url.project(), &id)?;
    let (user, branch) = pull.head_user_and_branch();
    let (user, branch) = (user.to_string(), branch.to_string());
    if pull.head.repo.is_none() {
        return Err(HubError::Domain(format!(
            "Error: {}'s fork is not available anymore",
            user
        )));
    }
    Ok(Some(PullHead {
        id,
        url,
        pull,
        user,
        branch,
    }))
}

impl PullHead {
    fn head_url(&self, ctx: &Context) -> Result<String, HubError> {
        let project = ctx.github_project(Some(&self.url.name), Some(&self.user))?;
        let private = self.pull.head.repo.as_ref().is_some_and(|r| r.private);
        Ok(ctx.git_url(&project, private))
    }

    fn tracking_ref(&self) -> String {
        format!(
            "+refs/heads/{}:refs/remotes/{}/{}",
            self.branch, self.user, self.branch
        )
    }
}

/// `checkout PULLREQ-URL [BRANCH]`
pub fn checkout(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    let words = args.words();
    let Some(url_arg) = words.get(1).cloned() else {
        return Ok(());
    };
    let Some(head) = resolve_pull(ctx, &url_arg)? else {
        return Ok(());
    };

    let explicit_branch = words.get(2).cloned();
    if let Some(name) = &explicit_branch {
        args.remove_value(name);
    }
    let new_branch = explicit_branch.unwrap_or_else(|| format!("{}-{}", head.user, head.branch));

    if ctx.has_remote(&head.user) {
        args.schedule_before(&[
            "remote",
            "set-branches",
            "--add",
            head.user.as_str(),
            head.branch.as_str(),
        ]);
        args.schedule_before(&["fetch", head.user.as_str(), head.tracking_ref().as_str()]);
    } else {
        let url = head.head_url(ctx)?;
        args.schedule_before(&[
            "remote",
            "add",
            "-f",
            "-t",
            head.branch.as_str(),
            head.user.as_str(),
            url.as_str(),
        ]);
    }

    if let Some(idx) = args.position(&url_arg) {
        args.remove_at(idx);
        let upstream = format!("{}/{}", head.user, head.branch);
        args.insert_at(idx, &["--track", "-B", new_branch.as_str(), upstream.as_str()]);
    }
    Ok(())
}

/// `merge PULLREQ-URL`
pub fn merge(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    let Some(url_arg) = args.words().get(1).cloned() else {
        return Ok(());
    };
    let Some(head) = resolve_pull(ctx, &url_arg)? else {
        return Ok(());
    };

    let url = head.head_url(ctx)?;
    args.schedule_before(&["fetch", url.as_str(), head.tracking_ref().as_str()]);

    if let Some(idx) = args.position(&url_arg) {
        args.remove_at(idx);
        let merge_head = format!("{}/{}", head.user, head.branch);
        let message = format!(
            "Merge pull request #{} from {}\n\n{}",
            head.id, merge_head, head.pull.title
        );
        args.insert_at(
            idx,
            &[merge_head.as_str(), "--no-ff", "-m", message.as_str()],
        );
    }
    Ok(())
}
