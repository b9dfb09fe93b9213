//! The mutable command line a rewrite rule works on.

use crate::utils::shell_line;

/// A command queued to run before or after the main command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledCommand {
    pub executable: String,
    pub args: Vec<String>,
}

impl ScheduledCommand {
    pub fn new(executable: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            executable: executable.into(),
            args,
        }
    }

    pub fn to_shell_line(&self) -> String {
        shell_line(&self.executable, &self.args)
    }
}

/// Text a rule produced instead of (or before) running anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOutput {
    pub text: String,
    /// Send through the pager when stdout is a terminal.
    pub paged: bool,
}

/// Ordered argument tokens plus everything needed to turn them into the
/// final command chain.
///
/// `tokens[0]` is the subcommand. Positional edits shift later tokens, so
/// rules that mutate more than once look tokens up again by value instead
/// of holding on to indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentList {
    tokens: Vec<String>,
    executable: String,
    wrapped_tool: String,
    prior: Vec<ScheduledCommand>,
    followups: Vec<ScheduledCommand>,
    exec_flags: Vec<String>,
    local_flags: Vec<String>,
    noop: bool,
    skip: bool,
    output: Option<DisplayOutput>,
    notices: Vec<String>,
}

impl ArgumentList {
    pub fn new<S: AsRef<str>>(tokens: &[S], wrapped_tool: &str) -> Self {
        Self {
            tokens: tokens.iter().map(|t| t.as_ref().to_string()).collect(),
            executable: wrapped_tool.to_string(),
            wrapped_tool: wrapped_tool.to_string(),
            prior: Vec::new(),
            followups: Vec::new(),
            exec_flags: Vec::new(),
            local_flags: Vec::new(),
            noop: false,
            skip: false,
            output: None,
            notices: Vec::new(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn command(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn position(&self, token: &str) -> Option<usize> {
        self.tokens.iter().position(|t| t == token)
    }

    /// Non-flag tokens, the subcommand included.
    ///
    /// `remote add -f tekkub` has the words `remote add tekkub`.
    pub fn words(&self) -> Vec<String> {
        self.tokens
            .iter()
            .filter(|t| !t.starts_with('-'))
            .cloned()
            .collect()
    }

    pub fn flags(&self) -> Vec<String> {
        self.tokens
            .iter()
            .filter(|t| t.starts_with('-'))
            .cloned()
            .collect()
    }

    /// True when any of `names` appears, alone or as `--name=value`.
    pub fn has_flag(&self, names: &[&str]) -> bool {
        self.tokens.iter().any(|token| {
            names.iter().any(|name| {
                token == name
                    || token
                        .strip_prefix(name)
                        .is_some_and(|rest| rest.starts_with('='))
            })
        })
    }

    /// Insert tokens at `index`, shifting later tokens right. An index past
    /// the end appends.
    pub fn insert_at<S: AsRef<str>>(&mut self, index: usize, tokens: &[S]) {
        let index = index.min(self.tokens.len());
        self.tokens.splice(
            index..index,
            tokens.iter().map(|t| t.as_ref().to_string()),
        );
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.tokens.pop()
    }

    /// Remove the token at `index`; out of range is a no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        (index < self.tokens.len()).then(|| self.tokens.remove(index))
    }

    /// Remove the first occurrence of `token`. Returns whether anything was
    /// removed so a second call on the same list is harmless.
    pub fn remove_value(&mut self, token: &str) -> bool {
        match self.position(token) {
            Some(index) => {
                self.tokens.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn set(&mut self, index: usize, token: impl Into<String>) {
        if let Some(slot) = self.tokens.get_mut(index) {
            *slot = token.into();
        }
    }

    /// Replace the first occurrence of `old` with `new`.
    pub fn replace_value(&mut self, old: &str, new: impl Into<String>) -> bool {
        match self.position(old) {
            Some(index) => {
                self.tokens[index] = new.into();
                true
            }
            None => false,
        }
    }

    pub fn replace_all<S: AsRef<str>>(&mut self, tokens: &[S]) {
        self.tokens = tokens.iter().map(|t| t.as_ref().to_string()).collect();
    }

    /// Drop the subcommand and return the remaining tokens, for rules that
    /// parse their own arguments and rebuild the list afterwards.
    pub fn take_arguments(&mut self) -> Vec<String> {
        if self.tokens.is_empty() {
            return Vec::new();
        }
        self.tokens.split_off(1)
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn set_executable(&mut self, executable: impl Into<String>) {
        self.executable = executable.into();
    }

    pub fn wrapped_tool(&self) -> &str {
        &self.wrapped_tool
    }

    /// Queue a wrapped-tool command to run before the main command.
    pub fn schedule_before<S: AsRef<str>>(&mut self, tokens: &[S]) {
        let tool = self.wrapped_tool.clone();
        self.schedule_before_with(&tool, tokens);
    }

    pub fn schedule_before_with<S: AsRef<str>>(&mut self, executable: &str, tokens: &[S]) {
        self.prior.push(ScheduledCommand::new(executable, to_strings(tokens)));
    }

    /// Queue a wrapped-tool command to run once the main command succeeded.
    pub fn schedule_after<S: AsRef<str>>(&mut self, tokens: &[S]) {
        let tool = self.wrapped_tool.clone();
        self.schedule_after_with(&tool, tokens);
    }

    pub fn schedule_after_with<S: AsRef<str>>(&mut self, executable: &str, tokens: &[S]) {
        self.followups
            .push(ScheduledCommand::new(executable, to_strings(tokens)));
    }

    pub fn prior_commands(&self) -> &[ScheduledCommand] {
        &self.prior
    }

    pub fn followup_commands(&self) -> &[ScheduledCommand] {
        &self.followups
    }

    pub fn is_chained(&self) -> bool {
        !self.prior.is_empty() || !self.followups.is_empty()
    }

    /// Flags placed after the executable of every wrapped-tool command.
    pub fn add_exec_flags<S: AsRef<str>>(&mut self, flags: &[S]) {
        self.exec_flags.extend(to_strings(flags));
    }

    pub fn exec_flags(&self) -> &[String] {
        &self.exec_flags
    }

    /// Flags placed on the main command only.
    pub fn add_local_flags<S: AsRef<str>>(&mut self, flags: &[S]) {
        self.local_flags.extend(to_strings(flags));
    }

    pub fn set_noop(&mut self) {
        self.noop = true;
    }

    pub fn is_dry_run(&self) -> bool {
        self.noop
    }

    /// Mark the invocation as fully handled; only `output` is shown.
    pub fn skip(&mut self) {
        self.skip = true;
    }

    pub fn is_skipped(&self) -> bool {
        self.skip
    }

    pub fn display(&mut self, text: impl Into<String>, paged: bool) {
        self.output = Some(DisplayOutput {
            text: text.into(),
            paged,
        });
        self.skip = true;
    }

    pub fn output(&self) -> Option<&DisplayOutput> {
        self.output.as_ref()
    }

    pub fn notice(&mut self, text: impl Into<String>) {
        self.notices.push(text.into());
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// The main command as it will run: executable, flags, tokens.
    pub fn main_command(&self) -> ScheduledCommand {
        let mut args = Vec::new();
        if self.executable == self.wrapped_tool {
            args.extend(self.exec_flags.iter().cloned());
            args.extend(self.local_flags.iter().cloned());
        }
        args.extend(self.tokens.iter().cloned());
        ScheduledCommand::new(&self.executable, args)
    }

    /// The full chain in execution order, with exec flags applied to every
    /// wrapped-tool command.
    pub fn commands(&self) -> Vec<ScheduledCommand> {
        let with_flags = |cmd: &ScheduledCommand| {
            if cmd.executable != self.wrapped_tool || self.exec_flags.is_empty() {
                return cmd.clone();
            }
            let mut args = self.exec_flags.clone();
            args.extend(cmd.args.iter().cloned());
            ScheduledCommand::new(&cmd.executable, args)
        };

        self.prior
            .iter()
            .map(with_flags)
            .chain(std::iter::once(self.main_command()))
            .chain(self.followups.iter().map(with_flags))
            .collect()
    }
}

fn to_strings<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens.iter().map(|t| t.as_ref().to_string()).collect()
}
