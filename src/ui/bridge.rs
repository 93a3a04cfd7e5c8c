// InputBridge - Feeds blocking line input into the async event loop
//
// Reading stdin blocks, so a dedicated thread does the reading and forwards
// each line over a bounded tokio channel. The game loop awaits lines on the
// runtime thread and never touches the reader.

use std::io::BufRead;
use tokio::sync::mpsc;

/// Channel capacity between the reader thread and the event loop
pub const INPUT_CHANNEL_CAPACITY: usize = 100;

/// Line source for the terminal controller
///
/// # Example
/// ```ignore
/// let mut bridge = InputBridge::stdin();
/// while let Some(line) = bridge.recv().await {
///     controller.handle_line(&line);
/// }
/// ```
pub struct InputBridge {
    line_rx: mpsc::Receiver<String>,
}

impl InputBridge {
    /// Read lines from standard input
    pub fn stdin() -> Self {
        Self::spawn(std::io::BufReader::new(std::io::stdin()))
    }

    /// Read lines from any blocking reader on a background thread.
    ///
    /// The thread stops at end of input, on a read error, or once the
    /// bridge is dropped.
    pub fn spawn<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (line_tx, line_rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);

        std::thread::spawn(move || {
            tracing::debug!("InputBridge reader thread started");

            for line in reader.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::warn!("Failed to read input: {}", e);
                        break;
                    }
                };

                if line_tx.blocking_send(line).is_err() {
                    // Receiver dropped, the event loop is gone
                    break;
                }
            }

            tracing::debug!("InputBridge reader thread terminated");
        });

        Self { line_rx }
    }

    /// Wait for the next line, `None` once input is exhausted
    pub async fn recv(&mut self) -> Option<String> {
        self.line_rx.recv().await
    }
}
