use crate::commands::context::Context;
use crate::error::HubError;
use crate::git::ArgumentList;
use crate::repo_url::Shorthand;

/// `remote add [-p] [-f] [NAME] OWNER[/REPO]` and `remote set-url`.
///
/// The trailing shorthand becomes a clone URL. When it is the only word
/// after `add` it doubles as the remote name and is reduced to the owner.
pub fn remote(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    if !matches!(args.get(1), Some("add" | "set-url")) {
        return Ok(());
    }
    let Some(last) = args.last().map(str::to_string) else {
        return Ok(());
    };

    let (mut user, mut repo) = match ctx.shorthand(&last) {
        Some(Shorthand::OwnerAndName { owner, name }) => (owner, Some(name)),
        Some(Shorthand::Owner(owner)) => (owner, None),
        _ => return Ok(()),
    };

    let words = args.words();
    if words.len() < 3 {
        return Ok(());
    }
    let private = args.remove_value("-p");

    // `remote add SHORTHAND` versus `remote add NAME SHORTHAND`, decided by
    // position so a remote may itself be called `add`
    let names_the_remote = words.len() == 3;
    args.pop();
    if names_the_remote && last == "origin" {
        user = ctx.github_user()?;
        repo = None;
        args.push(last.as_str());
    } else if names_the_remote {
        args.push(user.as_str());
    }

    let project = ctx.github_project(repo.as_deref(), Some(&user))?;
    args.push(ctx.git_url(&project, private));
    Ok(())
}
