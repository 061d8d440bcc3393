//! Supervised execution of one external command.
//!
//! The child's stdout and stderr both write into one shared anonymous
//! pipe, so the console sees exactly the interleaving the child
//! produced. Reading is byte-based with lossy UTF-8 decoding because the
//! external tools can emit non-UTF8 bytes; `BufReader::lines()` would
//! kill the stream on the first invalid sequence.
//!
//! Every failure folds into the returned [`RunOutcome`]; nothing escapes
//! the worker.

use std::io::{self, BufRead, BufReader};
use std::process::{Command, Stdio};
use std::sync::Arc;

use tokio::task;
use tracing::{debug, warn};
use ytgrab_core::ports::ConsoleSinkPort;
use ytgrab_core::{CommandLine, RunOutcome};

/// Run a command to completion, forwarding each output line to `sink`.
///
/// Blocking child I/O happens on a dedicated blocking worker; the caller
/// is only suspended, never blocked. The returned outcome is produced
/// exactly once: exit code 0 maps to `Succeeded`, any other code to
/// `Failed`, and spawn/stream errors to `Errored`.
pub async fn run_to_completion(command: &CommandLine, sink: Arc<dyn ConsoleSinkPort>) -> RunOutcome {
    let command = command.clone();
    let joined = task::spawn_blocking(move || run_blocking(&command, sink.as_ref())).await;

    match joined {
        Ok(outcome) => outcome,
        Err(join_error) => {
            // A panicking sink is the only way to get here; report it like
            // any other run failure instead of crashing the caller.
            warn!(error = %join_error, "supervisor worker did not finish cleanly");
            RunOutcome::errored(format!("supervisor worker failed: {join_error}"))
        }
    }
}

fn run_blocking(command: &CommandLine, sink: &dyn ConsoleSinkPort) -> RunOutcome {
    debug!(program = command.program(), "spawning child process");
    match stream_child(command, sink) {
        Ok(outcome) => outcome,
        Err(error) => {
            debug!(error = %error, program = command.program(), "run did not complete");
            RunOutcome::errored(error)
        }
    }
}

/// Spawn, stream the merged output, wait for exit.
fn stream_child(command: &CommandLine, sink: &dyn ConsoleSinkPort) -> io::Result<RunOutcome> {
    let (reader, writer) = io::pipe()?;
    let stderr_writer = writer.try_clone()?;

    let mut child_command = Command::new(command.program());
    child_command
        .args(command.args())
        .stdin(Stdio::null())
        .stdout(Stdio::from(writer))
        .stderr(Stdio::from(stderr_writer));

    let mut child = child_command.spawn()?;
    // Close our copies of the write ends; the reader only sees EOF once
    // the child's copies are gone.
    drop(child_command);

    let mut reader = BufReader::new(reader);
    let mut buf: Vec<u8> = Vec::with_capacity(1024);

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break, // EOF
            Ok(_) => {
                // Trim trailing newline(s)
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }

                let line = String::from_utf8_lossy(&buf).to_string();
                debug!("child: {line}");
                sink.append(line);
            }
            Err(e) => {
                debug!(error = %e, "output reader exiting due to read error");
                break;
            }
        }
    }

    let status = child.wait()?;
    // Termination without a code (e.g. by signal) reports -1.
    let code = status.code().unwrap_or(-1);
    debug!(code, "child process exited");
    Ok(RunOutcome::from_exit_code(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        lines: Mutex<Vec<String>>,
    }

    impl RecordingSink {
        fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl ConsoleSinkPort for RecordingSink {
        fn append(&self, line: String) {
            self.lines.lock().unwrap().push(line);
        }
    }

    fn shell(script: &str) -> CommandLine {
        let mut command = CommandLine::new("sh");
        command.arg("-c").arg(script);
        command
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_lines_delivered_in_order_then_success() {
        let sink = Arc::new(RecordingSink::default());
        let outcome = run_to_completion(&shell("printf 'A\\nB\\n'"), sink.clone()).await;

        assert_eq!(outcome, RunOutcome::Succeeded);
        assert_eq!(sink.lines(), vec!["A".to_string(), "B".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdout_and_stderr_interleave_in_emission_order() {
        let sink = Arc::new(RecordingSink::default());
        let outcome =
            run_to_completion(&shell("echo out1; echo err1 1>&2; echo out2"), sink.clone()).await;

        assert_eq!(outcome, RunOutcome::Succeeded);
        assert_eq!(
            sink.lines(),
            vec!["out1".to_string(), "err1".to_string(), "out2".to_string()]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_high_volume_merged_output_preserves_order() {
        let sink = Arc::new(RecordingSink::default());
        let script = "i=1; while [ $i -le 4000 ]; do \
                      echo \"stdout chunk $i\"; echo \"stderr chunk $i\" 1>&2; \
                      i=$((i+1)); done";
        let outcome = run_to_completion(&shell(script), sink.clone()).await;

        assert_eq!(outcome, RunOutcome::Succeeded);
        let lines = sink.lines();
        assert_eq!(lines.len(), 8000);
        assert_eq!(lines[0], "stdout chunk 1");
        assert_eq!(lines[1], "stderr chunk 1");
        assert_eq!(lines[7999], "stderr chunk 4000");

        // Well past the kernel pipe buffer; the reader has to drain
        // while the child is still writing.
        let bytes: usize = lines.iter().map(|line| line.len() + 1).sum();
        assert!(bytes > 64 * 1024, "script output too small: {bytes} bytes");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_maps_to_failed_with_code() {
        let sink = Arc::new(RecordingSink::default());
        let outcome = run_to_completion(&shell("exit 3"), sink.clone()).await;

        assert_eq!(outcome, RunOutcome::Failed { exit_code: 3 });
        assert!(sink.lines().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_carriage_returns_trimmed() {
        let sink = Arc::new(RecordingSink::default());
        let outcome = run_to_completion(&shell("printf 'A\\r\\n'"), sink.clone()).await;

        assert_eq!(outcome, RunOutcome::Succeeded);
        assert_eq!(sink.lines(), vec!["A".to_string()]);
    }

    #[tokio::test]
    async fn test_unspawnable_program_reports_errored() {
        let sink = Arc::new(RecordingSink::default());
        let command = CommandLine::new("ytgrab-test-no-such-binary-8261");
        let outcome = run_to_completion(&command, sink.clone()).await;

        assert!(matches!(outcome, RunOutcome::Errored { .. }));
        assert!(sink.lines().is_empty());
    }
}
