use std::io::{self, Write};

use colored::Colorize;

use crate::command::{DispatchError, Reply};

/// Writes a command outcome as status text. Confirmations are green, failures
/// red, listings uncolored.
pub fn write_outcome(
    output: &mut impl Write,
    outcome: &Result<Reply, DispatchError>,
) -> io::Result<()> {
    match outcome {
        Ok(
            reply @ (Reply::Listing { .. } | Reply::Levels(_) | Reply::WorkingDirectory(_)),
        ) => writeln!(output, "{reply}"),
        Ok(reply) => writeln!(output, "{}", reply.to_string().green()),
        Err(error) => writeln!(output, "{}", error.to_string().red()),
    }
}

/// Writes the command line being run, for script output
pub fn write_echo(output: &mut impl Write, line: &str) -> io::Result<()> {
    writeln!(output, "{}", format!("> {line}").dimmed())
}
