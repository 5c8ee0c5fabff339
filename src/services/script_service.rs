use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};
use crate::models::InvocationConfig;
use crate::services::dispatch_service::DispatchError;

/// Captured result of a successful client script run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutput {
    pub exit_code: i32,
    pub stdout: Vec<String>,
}

/// Run `<interpreter> <flags...> <script> <args...>` and wait for it to exit.
///
/// The child is killed if it outlives `timeout`.
pub async fn run_script(
    interpreter: &str,
    script: &Path,
    invocation: &InvocationConfig,
    timeout: Duration,
) -> Result<ScriptOutput, DispatchError> {
    let mut command = Command::new(interpreter);
    command
        .args(&invocation.flags)
        .arg(script)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!(
        "Spawning {} {:?} {} {:?}",
        interpreter,
        invocation.flags,
        script.display(),
        invocation.args
    );

    let child = command
        .spawn()
        .map_err(|e| DispatchError::Spawn(format!("{} {}: {}", interpreter, script.display(), e)))?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|e| DispatchError::Spawn(e.to_string()))?,
        Err(_) => return Err(DispatchError::Timeout(timeout)),
    };

    // Killed by a signal on unix
    let exit_code = output.status.code().unwrap_or(-1);
    if !output.status.success() {
        return Err(DispatchError::ScriptFailed {
            exit_code,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let mut stdout: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect();
    while stdout.last().is_some_and(|line| line.is_empty()) {
        stdout.pop();
    }

    info!("Client script exited with code {} ({} lines of output)", exit_code, stdout.len());
    Ok(ScriptOutput { exit_code, stdout })
}
