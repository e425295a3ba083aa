use std::io::{self, BufRead, BufReader};
use std::thread;

use futures::stream;
use futures_channel::mpsc::{self, UnboundedReceiver};
use tracing::{debug, warn};

use crate::config::Script;

/// Lines of a script, in order
pub fn script_source(script: &Script) -> stream::Iter<std::vec::IntoIter<String>> {
    stream::iter(script.commands.clone())
}

/// Forwards lines from a blocking reader over a channel. The reader runs on
/// its own thread and stops at end of input, on a read error, or once the
/// receiving side is dropped.
pub fn reader_source<R>(reader: R) -> UnboundedReceiver<String>
where
    R: BufRead + Send + 'static,
{
    let (sender, receiver) = mpsc::unbounded();

    thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if sender.unbounded_send(line).is_err() {
                        debug!("Command receiver dropped, stopping input reader");
                        break;
                    }
                }
                Err(error) => {
                    warn!("Failed to read command input: {}", error);
                    break;
                }
            }
        }
        debug!("Input reader finished");
    });

    receiver
}

pub fn stdin_source() -> UnboundedReceiver<String> {
    reader_source(BufReader::new(io::stdin()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::io::Cursor;

    #[compio::test]
    async fn reader_source_forwards_every_line() {
        let input = Cursor::new("mkdir 10\n\ntouch 7 10\r\nls");
        let lines: Vec<String> = reader_source(input).collect().await;

        assert_eq!(lines, vec!["mkdir 10", "", "touch 7 10", "ls"]);
    }

    #[compio::test]
    async fn script_source_preserves_order() {
        let script = Script {
            commands: vec!["mkdir a".into(), "cd a".into()],
            ..Script::default()
        };
        let lines: Vec<String> = script_source(&script).collect().await;

        assert_eq!(lines, script.commands);
    }
}
