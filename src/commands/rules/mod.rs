pub mod apply;
pub mod browse;
pub mod checkout;
pub mod cherry_pick;
pub mod clone;
pub mod create;
pub mod fetch;
pub mod fork;
pub mod init;
pub mod meta;
pub mod pull_request;
pub mod push;
pub mod remote;

use crate::commands::context::Context;
use crate::error::HubError;
use crate::git::ArgumentList;

/// A rewrite for one subcommand. Returning an error aborts the invocation
/// before anything runs.
pub type Rule = fn(&mut ArgumentList, &Context) -> Result<(), HubError>;

/// Map a command name to its rule identifier: a dash following a word
/// character becomes an underscore (`pull-request` -> `pull_request`).
pub fn normalize(command: &str) -> String {
    let mut out = String::with_capacity(command.len());
    let mut prev_is_word = false;
    for c in command.chars() {
        if c == '-' && prev_is_word {
            out.push('_');
        } else {
            out.push(c);
        }
        prev_is_word = c.is_alphanumeric() || c == '_';
    }
    out
}

pub fn lookup(command: &str) -> Option<Rule> {
    let rule: Rule = match normalize(command).as_str() {
        "clone" => clone::clone,
        "submodule" => clone::submodule,
        "remote" => remote::remote,
        "fetch" => fetch::fetch,
        "push" => push::push,
        "checkout" => checkout::checkout,
        "merge" => checkout::merge,
        "cherry_pick" => cherry_pick::cherry_pick,
        "am" | "apply" => apply::apply,
        "init" => init::init,
        "create" => create::create,
        "fork" => fork::fork,
        "pull_request" => pull_request::pull_request,
        "browse" => browse::browse,
        "compare" => browse::compare,
        "hub" => meta::hub,
        "version" => meta::version,
        "help" => meta::help,
        "alias" => meta::alias,
        _ => return None,
    };
    Some(rule)
}
