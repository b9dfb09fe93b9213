use crate::api::PullRequestRequest;
use crate::commands::context::Context;
use crate::error::HubError;
use crate::git::ArgumentList;
use crate::repo_url::RepositoryReference;

/// Title and body from an edited message. `#` lines are comments, the first
/// paragraph is the title (joined onto one line) and the rest the body.
pub fn parse_edit_message(text: &str) -> (Option<String>, Option<String>) {
    let mut title = String::new();
    let mut body = String::new();
    for line in text.lines().filter(|l| !l.starts_with('#')) {
        if body.is_empty() && !line.trim().is_empty() {
            title.push_str(line);
            title.push('\n');
        } else if !(body.is_empty() && title.is_empty()) {
            body.push_str(line);
            body.push('\n');
        }
    }
    let title = title.replace('\n', " ").trim().to_string();
    let body = body.trim().to_string();
    (
        (!title.is_empty()).then_some(title),
        (!body.is_empty()).then_some(body),
    )
}

fn message_template(base_label: &str, head_label: &str, changes: Option<&str>) -> String {
    let mut template = format!(
        "\n# Requesting a pull to {} from {}\n#\n\
         # Write a message for this pull request. The first block\n\
         # of text is the title and the rest is description.\n",
        base_label, head_label
    );
    if let Some(changes) = changes {
        template.push_str("#\n# Changes:\n#\n");
        for line in changes.lines() {
            template.push_str(format!("# {}", line).trim_end());
            template.push('\n');
        }
    }
    template
}

/// `owner:branch` moves the ref to another owner's copy of `project`.
fn from_ref(
    ctx: &Context,
    value: &str,
    project: &RepositoryReference,
) -> Result<(RepositoryReference, String), HubError> {
    match value.split_once(':') {
        Some((owner, branch)) => Ok((
            ctx.github_project(Some(&project.name), Some(owner))?,
            branch.to_string(),
        )),
        None => Ok((project.clone(), value.to_string())),
    }
}

fn required_value(
    rest: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<String, HubError> {
    rest.next()
        .ok_or_else(|| HubError::Usage(format!("missing value for {}", flag)))
}

/// `pull-request [-f] [-b BASE] [-h HEAD] [-i ISSUE | ISSUE-URL | TITLE]`
pub fn pull_request(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    let mut base_project = ctx.main_project().ok_or_else(|| {
        HubError::Domain(
            "Aborted: the origin remote doesn't point to a GitHub repository.".to_string(),
        )
    })?;
    let mut head_project = ctx.current_project().unwrap_or_else(|| base_project.clone());

    let mut force = false;
    let mut explicit_owner = false;
    let mut base: Option<String> = None;
    let mut head: Option<String> = None;
    let mut title: Option<String> = None;
    let mut issue: Option<String> = None;

    let mut rest = args.take_arguments().into_iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "-f" => force = true,
            "-b" => {
                let value = required_value(&mut rest, "-b")?;
                let (project, branch) = from_ref(ctx, &value, &base_project)?;
                base_project = project;
                base = Some(branch);
            }
            "-h" => {
                let value = required_value(&mut rest, "-h")?;
                explicit_owner = value.contains(':');
                let (project, branch) = from_ref(ctx, &value, &head_project)?;
                head_project = project;
                head = Some(branch);
            }
            "-i" => issue = Some(required_value(&mut rest, "-i")?),
            _ => {
                let issue_url = ctx
                    .parse_url(&arg)
                    .and_then(|url| url.issue_id().map(|id| (url.project(), id.to_string())));
                if let Some((project, id)) = issue_url {
                    base_project = project;
                    issue = Some(id);
                } else if title.is_none() {
                    title = Some(arg);
                } else {
                    return Err(HubError::Usage(format!("invalid argument: {}", arg)));
                }
            }
        }
    }

    let base = base.unwrap_or_else(|| ctx.default_branch().short_name().to_string());

    let tracked = if head.is_none() {
        ctx.upstream_branch()
    } else {
        None
    };
    if let Some(tracked) = &tracked
        && base_project == head_project
        && tracked.short_name() == base
    {
        return Err(HubError::Domain(format!(
            "Aborted: head branch is the same as base (\"{}\")\n\
             (use `-h <branch>` to specify an explicit pull request head)",
            base
        )));
    }

    let head = match head {
        Some(head) => head,
        None => tracked
            .clone()
            .or_else(|| ctx.current_branch())
            .map(|b| b.short_name().to_string())
            .ok_or_else(|| HubError::Domain("Aborted: no current branch".to_string()))?,
    };

    let user = ctx.github_user()?;
    if head_project.owner != user && tracked.is_none() && !explicit_owner {
        head_project = head_project.owned_by(&user);
    }

    let head_remote = ctx
        .remote_for(&head_project)
        .unwrap_or_else(|| head_project.owner.clone());
    let remote_branch = format!("{}/{}", head_remote, head);
    let head_label = format!("{}:{}", head_project.owner, head);
    let base_label = format!("{}:{}", base_project.owner, base);

    if !force && tracked.is_some() {
        let unpushed = ctx.local().unpushed_commits(&remote_branch);
        if !unpushed.is_empty() {
            return Err(HubError::Domain(format!(
                "Aborted: {} commits are not yet pushed to {}\n\
                 (use `-f` to force submit a pull request anyway)",
                unpushed.len(),
                remote_branch
            )));
        }
    }

    if args.is_dry_run() {
        args.display(
            format!("Would request a pull to {} from {}", base_label, head_label),
            false,
        );
        return Ok(());
    }

    let mut body = None;
    if title.is_none() && issue.is_none() {
        let base_remote = ctx
            .remote_for(&base_project)
            .unwrap_or_else(|| base_project.owner.clone());
        let base_branch = format!("{}/{}", base_remote, base);
        let changes = ctx.local().change_log(&base_branch, &remote_branch);
        let edited = ctx.local().edit_message(&message_template(
            &base_label,
            &head_label,
            changes.as_deref(),
        ))?;
        let (edited_title, edited_body) = parse_edit_message(&edited);
        if edited_title.is_none() {
            return Err(HubError::Domain(
                "Aborting due to empty pull request title".to_string(),
            ));
        }
        title = edited_title;
        body = edited_body;
    }

    let created = ctx.hosted().create_pull_request(&PullRequestRequest {
        project: base_project,
        base,
        head: head_label,
        title,
        body,
        issue,
    })?;

    args.set_executable("echo");
    args.replace_all(&[created.html_url]);
    Ok(())
}
