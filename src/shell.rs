//! The read-eval-print loop and the one-shot `exec` path that shares it.

use anyhow::{Context, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use std::io::{self, Write};
use tracing::{debug, info, warn};

use crate::config::ShellConfig;
use crate::dispatch::Dispatcher;
use crate::help;
use crate::params::extract_params;
use crate::registry::Registry;
use crate::remote::RemoteService;
use crate::render::Renderer;
use crate::tokenizer::tokenize;

pub struct Shell<'a> {
    registry: &'static Registry,
    dispatcher: Dispatcher<'a>,
    renderer: Renderer,
}

impl<'a> Shell<'a> {
    pub fn new(api: &'a dyn RemoteService, renderer: Renderer) -> Self {
        Self {
            registry: Registry::global(),
            dispatcher: Dispatcher::new(api),
            renderer,
        }
    }

    /// Tokenize and run one typed line. Blank lines do nothing.
    pub fn execute_line<W: Write>(&self, line: &str, out: &mut W) -> io::Result<bool> {
        self.execute(&tokenize(line), out)
    }

    /// Run a command given as `[command, args...]` and print its response.
    /// Returns false when the command failed.
    pub fn execute<W: Write>(&self, tokens: &[String], out: &mut W) -> io::Result<bool> {
        let Some((command, args)) = tokens.split_first() else {
            return Ok(true);
        };

        if help::is_help_command(command) {
            help::help(self.registry, args, out)?;
            return Ok(true);
        }

        let outcome = self.dispatcher.dispatch(command, &extract_params(args));
        if let Err(e) = &outcome {
            debug!(command = %command, error = %e, "command failed");
        }
        writeln!(out, "{}", self.renderer.render(&outcome))?;
        Ok(outcome.is_ok())
    }

    /// Interactive loop. Returns on end of input, interrupt or a read error.
    pub fn run(&self, config: &ShellConfig) -> Result<()> {
        let mut rl: Editor<CommandHelper, DefaultHistory> =
            Editor::with_config(editor_config(config)?)
                .context("Failed to initialize line editor")?;
        rl.set_helper(Some(CommandHelper {
            registry: self.registry,
        }));
        info!(history = config.history_capacity, "shell started");

        let stdout = io::stdout();
        loop {
            let line = match rl.readline(&config.prompt) {
                Ok(line) => line,
                Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
                Err(e) => {
                    warn!(error = %e, "cannot read input, leaving shell");
                    break;
                }
            };

            if line.trim().is_empty() {
                continue;
            }
            rl.add_history_entry(line.as_str())
                .context("Failed to record history")?;

            let mut out = stdout.lock();
            self.execute_line(&line, &mut out)?;
            out.flush()?;
        }

        info!("shell finished");
        Ok(())
    }
}

/// Every non-blank line is kept in history, repeats included.
fn editor_config(config: &ShellConfig) -> Result<rustyline::Config> {
    Ok(rustyline::Config::builder()
        .max_history_size(config.history_capacity)
        .context("Invalid history capacity")?
        .history_ignore_dups(false)
        .context("Invalid history settings")?
        .auto_add_history(false)
        .build())
}

/// Completes the command word against the registry.
struct CommandHelper {
    registry: &'static Registry,
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, names) = complete_command_word(self.registry, line, pos);
        let candidates = names
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: name,
            })
            .collect();
        Ok((start, candidates))
    }
}

/// Candidates for the word under the cursor, and where that word starts.
/// Only the first word of a line is a command; arguments are free-form.
fn complete_command_word(registry: &Registry, line: &str, pos: usize) -> (usize, Vec<String>) {
    let before = &line[..pos];
    let start = before.len() - before.trim_start().len();
    let word = &before[start..];
    if word.contains(char::is_whitespace) {
        return (pos, Vec::new());
    }
    (start, help::complete(registry, word))
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

impl Helper for CommandHelper {}
