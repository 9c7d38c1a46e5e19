use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;

pub const SCRIPT_ENV: &str = "POCKET_LEDGER_CLI_SCRIPT";

/// Entry point for the binary.
///
/// Process arguments run as a single command; otherwise commands come from
/// stdin (script mode, when `POCKET_LEDGER_CLI_SCRIPT` is set) or an
/// interactive prompt.
pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return run_once(&args);
    }

    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
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

fn run_once(tokens: &[String]) -> Result<(), CliError> {
    let mut context = ShellContext::new(CliMode::Script)?;
    let command = tokens[0].to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
    match context.dispatch(&command, &args) {
        Ok(_) => Ok(()),
        Err(CommandError::UnknownCommand(input)) => {
            context.suggest(&input);
            Err(CliError::Input(format!("unknown command `{input}`")))
        }
        Err(err) => Err(err.into()),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::info("Pocket Ledger. Type `help` for commands.");
    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if handle_line(context, trimmed) == LoopControl::Exit {
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

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if handle_line(context, &line) == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Parses and runs one line. Command failures are reported and the loop continues.
fn handle_line(context: &mut ShellContext, line: &str) -> LoopControl {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Could not parse input: {err}"));
            return LoopControl::Continue;
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return LoopControl::Continue;
    };
    if raw.starts_with('#') {
        return LoopControl::Continue;
    }

    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.last_command = Some(line.trim().to_string());

    match context.dispatch(&command, &args) {
        Ok(control) => control,
        Err(err) => {
            context.report_error(err);
            LoopControl::Continue
        }
    }
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    /// Completes the command word only; arguments are free text.
    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        if prefix.trim_start().contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let start = prefix.len() - prefix.trim_start().len();
        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}
