use crate::commands::context::Context;
use crate::error::HubError;
use crate::git::ArgumentList;
use once_cell::sync::Lazy;
use regex::Regex;

/// Clone options whose value is a separate token.
static VALUE_FLAGS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(--(upload-pack|template|depth|origin|branch|reference)|-[ubo])$")
        .expect("clone value flags pattern is valid")
});

/// `clone [-p] [OPTIONS] [OWNER/]REPO [DIR]`
pub fn clone(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    let mut private = args.remove_value("-p");

    let mut idx = 1;
    while let Some(arg) = args.get(idx) {
        if arg.starts_with('-') {
            if VALUE_FLAGS.is_match(arg) {
                idx += 1;
            }
            idx += 1;
            continue;
        }

        if let Some(shorthand) = ctx.shorthand(arg) {
            let project = ctx.shorthand_project(&shorthand)?;
            if args.command() != Some("submodule") {
                private |= ctx
                    .optional_github_user()
                    .is_some_and(|user| user == project.owner);
            }
            let url = ctx.git_url(&project, private);
            args.set(idx, url);
        }
        break;
    }
    Ok(())
}

/// `submodule add [-b BRANCH] [OWNER/]REPO [PATH]`
///
/// Runs the clone rewrite with `add` and the branch option lifted out so
/// they are not mistaken for the repository.
pub fn submodule(args: &mut ArgumentList, ctx: &Context) -> Result<(), HubError> {
    let Some(add_idx) = args.position("add") else {
        return Ok(());
    };
    args.remove_at(add_idx);

    let branch = args
        .position("-b")
        .or_else(|| args.position("--branch"))
        .map(|idx| {
            let flag = args.remove_at(idx);
            let name = args.remove_at(idx);
            (idx, flag, name)
        });

    clone(args, ctx)?;

    if let Some((idx, Some(flag), name)) = branch {
        let mut restored = vec![flag];
        restored.extend(name);
        args.insert_at(idx, &restored);
    }
    args.insert_at(add_idx, &["add"]);
    Ok(())
}
