//! The `help` meta-command and command-name completion.

use std::io::{self, Write};

use crate::registry::Registry;

const BANNER: &str = "slack-shell\nType:\t\"help <command>\" for help on <command>\n";

/// True for the reserved meta-command words, in any case.
pub fn is_help_command(word: &str) -> bool {
    word.eq_ignore_ascii_case("help") || word == "?"
}

/// Print help for the arguments that followed `help`.
///
/// No argument prints the banner, one prints that command's usage (or
/// nothing when it is unknown), more than one prints a blank line.
pub fn help<W: Write>(registry: &Registry, args: &[String], out: &mut W) -> io::Result<()> {
    match args {
        [] => writeln!(out, "{BANNER}"),
        [name] => match registry.help_for(name) {
            Some(text) => writeln!(out, "\n{text}"),
            None => Ok(()),
        },
        _ => writeln!(out),
    }
}

/// Every command that starts with `prefix`, ignoring case, in registry order.
pub fn complete(registry: &Registry, prefix: &str) -> Vec<String> {
    registry
        .all_matching_prefix(prefix)
        .into_iter()
        .map(str::to_string)
        .collect()
}
