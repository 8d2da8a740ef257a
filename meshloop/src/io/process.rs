//! Helpers for running child processes with live, tee'd stdout.

use std::io::{self, Read, Write};
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument, warn};

/// Stdout captured from a child that ran to completion.
#[derive(Debug)]
pub struct TeeOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
}

impl TeeOutput {
    /// Captured stdout as text, replacing invalid UTF-8.
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// Whether the child could be started at all.
#[derive(Debug)]
pub enum Tee {
    Finished(TeeOutput),
    NotStarted(io::Error),
}

/// Run `cmd`, copying its stdout to `sink` as it arrives while also collecting it.
///
/// Each chunk is written and flushed as soon as the child produces it, so an
/// interactive target stays visible. Stderr is inherited. There is no timeout:
/// this blocks until the child exits.
///
/// A spawn failure is reported as [`Tee::NotStarted`] rather than an error so
/// callers can choose their own policy. Read and sink failures are errors.
#[instrument(skip_all, fields(program = ?cmd.get_program()))]
pub fn tee_command<W: Write>(cmd: &mut Command, sink: &mut W) -> Result<Tee> {
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());

    debug!("spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            warn!(err = %e, "failed to spawn command");
            return Ok(Tee::NotStarted(e));
        }
    };

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not piped"))?;
    let collected = tee_stream(stdout, sink);

    // Reap the child even if the stream failed.
    let status = child.wait().context("wait for command")?;
    let stdout = collected?;

    debug!(exit_code = ?status.code(), bytes = stdout.len(), "command finished");
    Ok(Tee::Finished(TeeOutput { status, stdout }))
}

fn tee_stream<R: Read, W: Write>(mut reader: R, sink: &mut W) -> Result<Vec<u8>> {
    let mut collected = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("read output"),
        };
        sink.write_all(&chunk[..n]).context("write output")?;
        sink.flush().context("flush output")?;
        collected.extend_from_slice(&chunk[..n]);
    }

    Ok(collected)
}
