/// Leading options of a hub/git invocation, split by how far they reach.
///
/// Example: `hub -C ../x --no-pager --noop push a,b` =>
///   exec_flags  = ["-C", "../x"]      (every git command, including queries)
///   local_flags = ["--no-pager"]      (the main command only)
///   noop        = true
///   command     = ["push", "a,b"]
///
/// Rules:
/// - Only options *before* the subcommand are considered; parsing stops at the
///   first token that is not a recognized global option.
/// - `--version` and `--help` become the `version` / `help` subcommands.
/// - Supports `--long=VAL`, `--long VAL`, `-Cpath`, `-C path`, `-cname=value`,
///   and `-c name=value`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedGlobalFlags {
    pub exec_flags: Vec<String>,
    pub local_flags: Vec<String>,
    pub noop: bool,
    /// Subcommand followed by its arguments.
    pub command: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Kind {
    Noop,
    Meta,          // --version, --help
    PropagateFlag, // --bare, --no-replace-objects, ...
    PropagateValue,
    LocalFlag, // pager control
    NotGlobal,
}

fn is_eq_form(tok: &str, long: &str) -> bool {
    tok.len() > long.len() + 1 && tok.starts_with(long) && tok.as_bytes()[long.len()] == b'='
}

const VALUE_OPTIONS: &[&str] = &["--git-dir", "--work-tree", "--namespace", "--exec-path"];

fn classify(tok: &str) -> Kind {
    match tok {
        "--noop" => return Kind::Noop,
        "--version" | "--help" => return Kind::Meta,
        "-p" | "--paginate" | "-P" | "--no-pager" => return Kind::LocalFlag,
        "--bare"
        | "--no-replace-objects"
        | "--literal-pathspecs"
        | "--glob-pathspecs"
        | "--noglob-pathspecs"
        | "--icase-pathspecs" => return Kind::PropagateFlag,
        _ => {}
    }

    if tok.starts_with("-C") || tok.starts_with("-c") {
        return Kind::PropagateValue;
    }
    // --exec-path without a value prints git's exec path, so only the
    // assignment form is a global option.
    if tok == "--exec-path" {
        return Kind::NotGlobal;
    }
    if VALUE_OPTIONS
        .iter()
        .any(|long| tok == *long || is_eq_form(tok, long))
    {
        return Kind::PropagateValue;
    }

    Kind::NotGlobal
}

/// Consume one value-taking option starting at `i`. Returns the tokens to
/// keep and how many were consumed.
fn take_valueish(all: &[String], i: usize) -> (Vec<String>, usize) {
    let tok = &all[i];

    if tok.starts_with("--") && tok.contains('=') {
        return (vec![tok.clone()], 1);
    }
    // sticky short forms: -Cpath, -cname=value
    if tok.len() > 2 && (tok.starts_with("-C") || tok.starts_with("-c")) {
        return (vec![tok.clone()], 1);
    }
    if i + 1 < all.len() {
        return (vec![tok.clone(), all[i + 1].clone()], 2);
    }
    (vec![tok.clone()], 1)
}

pub fn parse_global_flags(args: &[String]) -> ParsedGlobalFlags {
    let mut parsed = ParsedGlobalFlags::default();
    let mut meta = None;
    let mut i = 0;

    while i < args.len() {
        let tok = args[i].as_str();
        match classify(tok) {
            Kind::Noop => {
                parsed.noop = true;
                i += 1;
            }
            Kind::Meta => {
                meta = Some(tok.trim_start_matches('-').to_string());
                i += 1;
                break;
            }
            Kind::LocalFlag => {
                parsed.local_flags.push(tok.to_string());
                i += 1;
            }
            Kind::PropagateFlag => {
                parsed.exec_flags.push(tok.to_string());
                i += 1;
            }
            Kind::PropagateValue => {
                let (tokens, consumed) = take_valueish(args, i);
                parsed.exec_flags.extend(tokens);
                i += consumed;
            }
            Kind::NotGlobal => break,
        }
    }

    let mut command: Vec<String> = meta.into_iter().collect();
    command.extend(args[i..].iter().cloned());
    parsed.command = command;
    parsed
}
