//! Line-oriented driver for the dashboard shell: readline sessions with
//! category-aware completion, or scripted runs over stdin.

use std::{
    borrow::Cow,
    collections::HashMap,
    io::{self, BufRead},
};

use colored::Colorize;
use rustyline::{
    completion::Completer, error::ReadlineError, highlight::Highlighter, hint::Hinter,
    history::DefaultHistory, validate::Validator, Context as ReadlineContext, Editor, Helper,
};
use shell_words::split;
use tracing::debug;

use crate::cli::commands::config::{CONFIG_ACTIONS, CONFIG_KEYS};
use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;

/// Set to run the shell non-interactively over stdin.
pub const SCRIPT_MODE_ENV: &str = "SPENDBOARD_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_MODE_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<ShellHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(ShellHelper::new(context)));

    loop {
        // categories change with every fetch
        if let Some(helper) = editor.helper_mut() {
            helper.categories = context.controller.universe();
        }

        match editor.readline(&context.prompt()) {
            Ok(input) => {
                let line = input.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();
                if step(context, line)? == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Blank lines and `#` comments are skipped.
fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for (idx, input) in io::stdin().lock().lines().enumerate() {
        let input = input?;
        let line = input.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        debug!(line_number = idx + 1, "script line");
        if step(context, line)? == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Runs one line. Command failures are reported and the loop goes on.
fn step(context: &mut ShellContext, line: &str) -> Result<LoopControl, CliError> {
    match handle_line(context, line) {
        Ok(control) => Ok(control),
        Err(err) => {
            context.report_error(err)?;
            Ok(LoopControl::Continue)
        }
    }
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&format!("Could not parse `{line}`: {err}"));
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };

    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    debug!(%command, args = args.len(), "dispatching");
    context.dispatch(&command, raw, &args)
}

/// Completes command names, then arguments by command: category keys for
/// `toggle`/`select`, actions and keys for `config`, command names for `help`.
struct ShellHelper {
    commands: Vec<&'static str>,
    usages: HashMap<&'static str, &'static str>,
    categories: Vec<String>,
}

impl ShellHelper {
    fn new(context: &ShellContext) -> Self {
        let mut commands = context.command_names();
        commands.sort_unstable();
        let usages = commands
            .iter()
            .filter_map(|name| context.command(name).map(|def| (*name, def.usage)))
            .collect();
        Self {
            commands,
            usages,
            categories: context.controller.universe(),
        }
    }

    /// Candidates for the word ending at `pos`, plus the offset it starts at.
    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<String>) {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let word = &prefix[start..];
        let before: Vec<String> = prefix[..start]
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        let (options, needle): (Vec<&str>, String) = match before.as_slice() {
            [] => (self.commands.clone(), word.to_lowercase()),
            [command, ..] if command == "toggle" || command == "select" => (
                self.categories.iter().map(String::as_str).collect(),
                word.to_string(),
            ),
            [command] if command == "config" => (CONFIG_ACTIONS.to_vec(), word.to_lowercase()),
            [command, action] if command == "config" && action == "set" => {
                (CONFIG_KEYS.to_vec(), word.to_lowercase())
            }
            [command] if command == "help" => (self.commands.clone(), word.to_lowercase()),
            _ => (Vec::new(), String::new()),
        };

        let matches = options
            .into_iter()
            .filter(|option| option.starts_with(&needle))
            .map(str::to_string)
            .collect();
        (start, matches)
    }

    /// Argument part of the usage line once a bare command and a space are typed.
    fn usage_hint(&self, line: &str) -> Option<String> {
        let command = line.strip_suffix(' ')?.trim_start();
        if command.is_empty() || command.contains(char::is_whitespace) {
            return None;
        }
        let usage = self.usages.get(command.to_lowercase().as_str())?;
        usage.split_once(' ').map(|(_, args)| args.to_string())
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        Ok(self.candidates(line, pos))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.usage_hint(line)
    }
}

impl Highlighter for ShellHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        if output::preferences().plain_mode {
            Cow::Borrowed(hint)
        } else {
            Cow::Owned(hint.dimmed().to_string())
        }
    }
}

impl Validator for ShellHelper {}
