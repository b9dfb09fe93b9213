use crate::commands::context::Context;
use crate::error::HubError;
use crate::git::ArgumentList;
use crate::repo_url::split_owner_at_sha;

/// `cherry-pick COMMIT-URL` and `cherry-pick OWNER@SHA`
///
/// The reference becomes a bare sha, fetched first from the owner's remote
/// (added on the fly if missing).
pub fn cherry_pick(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    if args.contains("-m") || args.contains("--mainline") {
        return Ok(());
    }
    let Some(reference) = args.words().last().cloned() else {
        return Ok(());
    };

    let resolved = if let Some(url) = ctx.parse_url(&reference) {
        url.commit_sha().map(|sha| (url.project(), sha.to_string()))
    } else if let Some((owner, sha)) = split_owner_at_sha(&reference) {
        ctx.main_project()
            .map(|main| (main.owned_by(owner), sha.to_string()))
    } else {
        None
    };
    let Some((project, sha)) = resolved else {
        return Ok(());
    };

    args.replace_value(&reference, sha);
    match ctx.remote_for(&project) {
        Some(remote) => args.schedule_before(&["fetch", remote.as_str()]),
        None => {
            let url = ctx.git_url(&project, false);
            args.schedule_before(&["remote", "add", "-f", project.remote_slug(), url.as_str()]);
        }
    }
    Ok(())
}
