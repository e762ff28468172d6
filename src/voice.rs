//! Single-shot voice capture through an external transcriber command
//!
//! The command is expected to listen once and print what it heard on
//! stdout. The first non-empty line is taken as the transcript. It runs
//! through the platform shell, so quoting and pipelines work as typed.

use std::process::Stdio;

use tokio::process::Command;

use crate::error::VoiceError;

pub async fn capture_transcript(command: &str) -> Result<String, VoiceError> {
    let command = command.trim();
    if command.is_empty() {
        return Err(VoiceError::EmptyCommand);
    }

    let output = shell(command)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await?;

    if !output.status.success() {
        return Err(VoiceError::Exit(output.status));
    }

    first_line(&String::from_utf8_lossy(&output.stdout)).ok_or(VoiceError::NoTranscript)
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut shell = Command::new("cmd");
    shell.arg("/C").arg(command);
    shell
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut shell = Command::new("sh");
    shell.arg("-c").arg(command);
    shell
}

fn first_line(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
