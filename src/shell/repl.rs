//! Read-Eval-Print Loop
//!
//! Feeds input lines to a [`Session`] and writes one reply per command.
//!
//! Input is read on a dedicated OS thread and handed over through a channel.
//! A blocking read parked on that thread never holds up runtime shutdown, so
//! Ctrl+C ends the process even while the terminal is idle.

use std::io::{self, BufRead};
use std::thread;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::debug;

use crate::shell::{Session, HELP_TEXT};

/// Lines buffered between the reader thread and the loop.
const LINE_BUFFER: usize = 64;

// == Line Reader ==
/// Spawns a thread that reads `reader` line by line into a channel.
///
/// The channel closes after EOF or the first read error (which is sent
/// through). The thread also stops once the receiver is dropped and its next
/// line has been read.
pub fn spawn_line_reader<R>(reader: R) -> io::Result<mpsc::Receiver<io::Result<String>>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);

    thread::Builder::new()
        .name("line-reader".to_string())
        .spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
            debug!("line reader finished");
        })?;

    Ok(rx)
}

// == Loop ==
/// Prints the banner, then runs lines until the channel closes or a command
/// asks to exit.
pub async fn run_repl<W>(
    session: &Session,
    mut lines: mpsc::Receiver<io::Result<String>>,
    out: &mut W,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(format!("In-Memory Key-Value Store\n{}\n", HELP_TEXT).as_bytes())
        .await?;

    loop {
        out.write_all(b"> ").await?;
        out.flush().await?;

        let Some(line) = lines.recv().await else {
            break;
        };
        let line = line?;

        if let Some(reply) = session.execute(&line).await {
            out.write_all(format!("{}\n", reply).as_bytes()).await?;
            if reply.is_exit() {
                break;
            }
        }
    }

    out.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};
    use std::sync::mpsc as std_mpsc;
    use std::time::Duration;

    use crate::kv::Store;

    /// Input that never produces a byte, like an idle terminal.
    struct StalledInput;

    impl Read for StalledInput {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            loop {
                thread::park();
            }
        }
    }

    async fn run_input(input: &'static str) -> String {
        let session = Session::new(Store::default());
        let lines = spawn_line_reader(Cursor::new(input)).unwrap();
        let mut out: Vec<u8> = Vec::new();

        run_repl(&session, lines, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_repl_stops_at_exit() {
        let output = run_input("SET a 1\nGET a\nEXIT\nGET a\n").await;

        let expected = format!(
            "In-Memory Key-Value Store\n{}\n> OK\n> \"1\"\n> Exiting store.\n",
            HELP_TEXT
        );
        assert_eq!(output, expected);
    }

    #[tokio::test]
    async fn test_repl_stops_at_eof() {
        let output = run_input("SET a 1\n\nDEL a").await;

        assert!(output.ends_with("> OK\n> > OK (deleted)\n> "));
    }

    #[test]
    fn test_shutdown_while_input_is_stalled() {
        let (done_tx, done_rx) = std_mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            runtime.block_on(async {
                let session = Session::new(Store::default());
                let lines = spawn_line_reader(BufReader::new(StalledInput)).unwrap();
                let mut out = tokio::io::sink();

                tokio::select! {
                    _ = run_repl(&session, lines, &mut out) => {
                        panic!("loop finished without input");
                    }
                    _ = tokio::time::sleep(Duration::from_millis(20)) => {}
                }
            });

            // Must not wait on the reader blocked in read()
            drop(runtime);
            done_tx.send(()).unwrap();
        });

        assert!(
            done_rx.recv_timeout(Duration::from_secs(5)).is_ok(),
            "runtime shutdown blocked on pending input"
        );
    }
}
