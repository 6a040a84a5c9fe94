use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("command is empty, nothing to launch")]
    EmptyCommand,
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed waiting for child process: {source}")]
    Wait {
        #[source]
        source: std::io::Error,
    },
}

/// Run a built command to completion
///
/// The first element is the program, the rest are its arguments. The child
/// shares this process's stdout and stderr.
pub async fn launch(argv: &[String]) -> Result<ExitStatus, LaunchError> {
    let (program, args) = argv.split_first().ok_or(LaunchError::EmptyCommand)?;

    tracing::info!("Starting stream: {}", program);
    tracing::debug!("Arguments: {:?}", args);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            program: program.clone(),
            source,
        })?;

    let status = child
        .wait()
        .await
        .map_err(|source| LaunchError::Wait { source })?;

    tracing::info!("{} exited with {}", program, status);

    Ok(status)
}
