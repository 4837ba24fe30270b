// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded subprocess execution with a hard timeout.
//!
//! Output streams are drained on reader threads so a chatty tool can never
//! block on a full pipe. Each buffer keeps at most one byte past the capture
//! limit (enough to know it was cut) and discards the rest.

use std::io::{self, Read};
#[cfg(unix)]
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, bounded};

use crate::check::MAX_CAPTURE_BYTES;

/// How long to poll between `try_wait` calls.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long to wait for both reader threads after the process is gone.
///
/// A tool may leave a grandchild holding the pipe open; we stop waiting
/// rather than hang.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Absolute locations of `kill`. The orchestrator's PATH is not consulted.
#[cfg(unix)]
pub(crate) const KILL_PROGRAMS: &[&str] = &["/bin/kill", "/usr/bin/kill"];

/// How the process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Exited(ExitStatus),
    /// Killed after exceeding its deadline.
    TimedOut,
}

/// Captured result of a bounded run.
#[derive(Debug)]
pub struct ProcessOutput {
    pub exit: Exit,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub elapsed: Duration,
}

impl ProcessOutput {
    /// Exit code, or `None` when killed by a signal or timed out.
    pub fn code(&self) -> Option<i32> {
        match self.exit {
            Exit::Exited(status) => status.code(),
            Exit::TimedOut => None,
        }
    }

    pub fn timed_out(&self) -> bool {
        self.exit == Exit::TimedOut
    }
}

/// Spawn `command` with piped output and wait at most `timeout`.
///
/// Stdin is closed. On Unix the child leads its own process group so the
/// whole tree can be killed on timeout.
pub fn run_bounded(mut command: Command, timeout: Duration) -> io::Result<ProcessOutput> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let start = Instant::now();
    let mut child = command.spawn()?;

    let stdout_rx = child.stdout.take().map(drain);
    let stderr_rx = child.stderr.take().map(drain);

    let exit = wait_with_deadline(&mut child, timeout, start)?;

    let drain_deadline = Instant::now() + DRAIN_GRACE;
    let stdout = collect(stdout_rx, drain_deadline);
    let stderr = collect(stderr_rx, drain_deadline);

    Ok(ProcessOutput {
        exit,
        stdout,
        stderr,
        elapsed: start.elapsed(),
    })
}

fn wait_with_deadline(child: &mut Child, timeout: Duration, start: Instant) -> io::Result<Exit> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Exit::Exited(status));
        }
        if start.elapsed() >= timeout {
            tracing::debug!("process {} exceeded {:?}, killing", child.id(), timeout);
            kill_tree(child);
            return Ok(Exit::TimedOut);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Kill the child's process group, then the child itself.
fn kill_tree(child: &mut Child) {
    #[cfg(unix)]
    kill_group(child.id());
    if let Err(e) = child.kill() {
        tracing::trace!("kill {}: {}", child.id(), e);
    }
    let _ = child.wait();
}

/// SIGKILL every process in the group led by `pid`.
#[cfg(unix)]
fn kill_group(pid: u32) {
    let Some(program) = KILL_PROGRAMS.iter().find(|p| Path::new(p).is_file()) else {
        tracing::warn!(
            "no kill program at {:?}; descendants of process {} may survive",
            KILL_PROGRAMS,
            pid
        );
        return;
    };
    // The child leads its own group, so -pid addresses every descendant.
    let group = format!("-{pid}");
    match Command::new(program)
        .args(["-KILL", "--", &group])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) if status.success() => {}
        Ok(status) => tracing::warn!("{} -KILL -- {} exited with {}", program, group, status),
        Err(e) => tracing::warn!("failed to run {}: {}", program, e),
    }
}

/// Read a stream to EOF on its own thread, keeping a bounded prefix.
fn drain<R: Read + Send + 'static>(mut stream: R) -> Receiver<Vec<u8>> {
    let (tx, rx) = bounded(1);
    thread::spawn(move || {
        let limit = MAX_CAPTURE_BYTES + 1;
        let mut kept = Vec::new();
        let mut chunk = [0u8; 8192];
        loop {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    let room = limit.saturating_sub(kept.len());
                    kept.extend_from_slice(&chunk[..n.min(room)]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
        let _ = tx.send(kept);
    });
    rx
}

fn collect(rx: Option<Receiver<Vec<u8>>>, deadline: Instant) -> Vec<u8> {
    rx.and_then(|rx| rx.recv_deadline(deadline).ok())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
