use std::io;
use std::process::Command;

/// What a finished shell command left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Runs a full command line through a shell and blocks until it exits.
pub trait CommandRunner {
    fn run(&self, command: &str) -> io::Result<ShellOutput>;
}

/// The platform shell: `sh -c` on Unix, `cmd /C` on Windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl CommandRunner for SystemShell {
    fn run(&self, command: &str) -> io::Result<ShellOutput> {
        let output = shell_command(command).output()?;
        Ok(ShellOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
