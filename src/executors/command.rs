use crate::core::errors::HostpingError;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::timeout;

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub success: bool,
    pub duration_ms: u128,
}

/// Runs `program` to completion or until `limit` elapses.
///
/// A nonzero exit is still `Ok`; callers inspect `success`. On timeout the
/// child is killed and reaped before `HostpingError::Timeout` is returned.
pub async fn execute(
    program: &str,
    args: &[String],
    limit: Duration,
) -> Result<CommandOutput, HostpingError> {
    let start = Instant::now();

    tracing::debug!("Executing: {} {:?} (limit {:?})", program, args, limit);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| HostpingError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let pid = child.id();

    // Drain both pipes off the wait path so a chatty child can't stall
    let stdout_task = child.stdout.take().map(spawn_reader);
    let stderr_task = child.stderr.take().map(spawn_reader);

    let status = match timeout(limit, child.wait()).await {
        Ok(Ok(status)) => status,
        Ok(Err(source)) => {
            return Err(HostpingError::Wait {
                program: program.to_string(),
                source,
            });
        }
        Err(_) => {
            tracing::debug!("{} (pid {:?}) exceeded {:?}, killing", program, pid, limit);
            if let Err(e) = child.kill().await {
                tracing::warn!("Failed to kill timed out {} (pid {:?}): {}", program, pid, e);
            }
            abort_reader(stdout_task);
            abort_reader(stderr_task);
            return Err(HostpingError::Timeout {
                program: program.to_string(),
                timeout: limit,
            });
        }
    };

    let stdout = collect_reader(stdout_task).await;
    let stderr = collect_reader(stderr_task).await;

    Ok(CommandOutput {
        stdout,
        stderr,
        exit_code: status.code(),
        success: status.success(),
        duration_ms: start.elapsed().as_millis(),
    })
}

// Reads raw bytes until EOF; localized ping output is often not UTF-8, and
// closing the pipe early would SIGPIPE the child.
fn spawn_reader<R>(mut stream: R) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            match stream.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => raw.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::debug!("Stopped reading child output: {}", e);
                    break;
                }
            }
        }
        decode_output(&raw)
    })
}

/// Lossy UTF-8 decode with line endings normalized to `\n` and no trailing
/// newline.
fn decode_output(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .lines()
        .collect::<Vec<_>>()
        .join("\n")
}

async fn collect_reader(task: Option<JoinHandle<String>>) -> String {
    match task {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}

fn abort_reader(task: Option<JoinHandle<String>>) {
    if let Some(handle) = task {
        handle.abort();
    }
}
