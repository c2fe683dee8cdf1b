use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrushError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Required tool not found: {0}. Please install pngcrush and jpegtran first!")]
    ToolMissing(String),

    #[error("Directory \"{0}\" doesn't exist.")]
    DirectoryNotFound(PathBuf),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Path is not valid UTF-8 and cannot be passed to the shell: {0}")]
    NonUtf8Path(PathBuf),

    #[error("Command `{command}` failed ({})", describe_exit(.code))]
    ToolFailed { command: String, code: Option<i32> },

    #[error("Failed to move crushed output over {path}: {source}")]
    Finalize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CrushError>;

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
