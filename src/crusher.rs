use crate::batch::{self, BatchSummary};
use crate::constants::{CHECK_TOOL, TMP_FILENAME_APPEND};
use crate::error::{CrushError, Result};
use crate::formats::ImageType;
use crate::shell::{CommandRunner, SystemShell};
use crate::{verbose, warn};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One crush job: a source image, where the crushed bytes go, and the
/// type that picks the tool.
///
/// Without a destination the job runs in temp mode: the tool writes to
/// `<source>_tmp`, which then replaces the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCrusher {
    source: PathBuf,
    destination: Option<PathBuf>,
    temp_path: Option<PathBuf>,
    image_type: ImageType,
}

/// What happened to a job's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrushOutcome {
    Crushed {
        output: PathBuf,
        original_size: u64,
        crushed_size: u64,
    },
    /// No crusher for this type; nothing was run or touched
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrushReport {
    pub source: PathBuf,
    pub image_type: ImageType,
    pub outcome: CrushOutcome,
}

impl CrushReport {
    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, CrushOutcome::Skipped)
    }

    /// Bytes saved; zero for skipped jobs or grown files.
    pub fn bytes_saved(&self) -> u64 {
        match self.outcome {
            CrushOutcome::Crushed {
                original_size,
                crushed_size,
                ..
            } => original_size.saturating_sub(crushed_size),
            CrushOutcome::Skipped => 0,
        }
    }
}

impl ImageCrusher {
    /// Creates a job.
    ///
    /// # Arguments
    /// * `source` - Image to crush
    /// * `destination` - Where to write the result; `None` or an empty path selects temp mode
    /// * `image_type` - Type override; otherwise taken from the destination's
    ///   extension if there is one, else from the source's
    pub fn new(
        source: impl Into<PathBuf>,
        destination: Option<PathBuf>,
        image_type: Option<ImageType>,
    ) -> Self {
        let source = source.into();
        let destination = destination.filter(|d| !d.as_os_str().is_empty());
        let temp_path = match destination {
            Some(_) => None,
            None => Some(temp_path_for(&source)),
        };
        let image_type = image_type.unwrap_or_else(|| {
            ImageType::from_path(destination.as_deref().unwrap_or(source.as_path()))
        });

        Self {
            source,
            destination,
            temp_path,
            image_type,
        }
    }

    /// Temp-mode job with the type taken from the source's extension.
    pub fn in_place(source: impl Into<PathBuf>) -> Self {
        Self::new(source, None, None)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    pub fn temp_path(&self) -> Option<&Path> {
        self.temp_path.as_deref()
    }

    pub fn image_type(&self) -> &ImageType {
        &self.image_type
    }

    pub fn is_temp_mode(&self) -> bool {
        self.temp_path.is_some()
    }

    /// Path the external tool writes to: the destination, or the temp path.
    pub fn output_path(&self) -> &Path {
        match (&self.destination, &self.temp_path) {
            (Some(destination), _) => destination,
            (None, Some(temp)) => temp,
            (None, None) => &self.source,
        }
    }

    /// The shell command `crush()` runs, or `None` for pass-through types.
    ///
    /// Paths are substituted verbatim; shell metacharacters in them are
    /// interpreted by the shell. Non-UTF-8 bytes come out as U+FFFD here,
    /// which is why `crush()` refuses such paths before running anything.
    pub fn command(&self) -> Option<String> {
        self.image_type.command_template().map(|template| {
            fill_template(
                template,
                &self.source.to_string_lossy(),
                &self.output_path().to_string_lossy(),
            )
        })
    }

    /// Crushes through the system shell.
    pub fn crush(&self) -> Result<CrushReport> {
        self.crush_with(&SystemShell)
    }

    /// Runs the type's tool through `runner` and, in temp mode, moves the
    /// result over the source.
    ///
    /// A failing tool leaves the source untouched and any temp output is
    /// discarded.
    pub fn crush_with<R: CommandRunner + ?Sized>(&self, runner: &R) -> Result<CrushReport> {
        let Some(command) = self.command() else {
            verbose!(
                "No crusher for \"{}\", skipping {}",
                self.image_type,
                self.source.display()
            );
            return Ok(self.report(CrushOutcome::Skipped));
        };

        for path in [self.source.as_path(), self.output_path()] {
            if path.to_str().is_none() {
                return Err(CrushError::NonUtf8Path(path.to_path_buf()));
            }
        }
        if !self.source.is_file() {
            return Err(CrushError::FileNotFound(self.source.clone()));
        }
        let original_size = fs::metadata(&self.source)?.len();

        verbose!("Running: {}", command);
        let output = runner.run(&command)?;
        if !output.success {
            if !output.stderr.is_empty() {
                verbose!("{}", String::from_utf8_lossy(&output.stderr).trim_end());
            }
            self.discard_temp_output();
            return Err(CrushError::ToolFailed {
                command,
                code: output.code,
            });
        }

        let final_path = match &self.temp_path {
            Some(temp) => {
                replace_with(temp, &self.source)?;
                self.source.clone()
            }
            None => self.output_path().to_path_buf(),
        };
        let crushed_size = fs::metadata(&final_path)?.len();

        Ok(self.report(CrushOutcome::Crushed {
            output: final_path,
            original_size,
            crushed_size,
        }))
    }

    /// Fails with [`CrushError::ToolMissing`] unless `pngcrush` answers a
    /// bare invocation. jpegtran is assumed to come with it.
    pub fn check_requirements() -> Result<()> {
        Self::check_requirements_with(&SystemShell)
    }

    pub fn check_requirements_with<R: CommandRunner + ?Sized>(runner: &R) -> Result<()> {
        check_tool(runner, CHECK_TOOL)
    }

    pub fn is_requirements_installed() -> bool {
        Self::is_requirements_installed_with(&SystemShell)
    }

    pub fn is_requirements_installed_with<R: CommandRunner + ?Sized>(runner: &R) -> bool {
        Self::check_requirements_with(runner).is_ok()
    }

    /// Crushes every PNG/JPEG under `directory` in place.
    /// See [`batch::batch`].
    pub fn batch(directory: impl AsRef<Path>, recursive: bool) -> Result<BatchSummary> {
        batch::batch(directory.as_ref(), recursive)
    }

    fn report(&self, outcome: CrushOutcome) -> CrushReport {
        CrushReport {
            source: self.source.clone(),
            image_type: self.image_type.clone(),
            outcome,
        }
    }

    fn discard_temp_output(&self) {
        if let Some(temp) = &self.temp_path {
            match fs::remove_file(temp) {
                Ok(()) => verbose!("Removed stale {}", temp.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!("Could not remove {}: {}", temp.display(), e),
            }
        }
    }
}

/// Invokes `tool` with no arguments; the tool counts as installed when it
/// prints anything to stdout.
pub fn check_tool<R: CommandRunner + ?Sized>(runner: &R, tool: &str) -> Result<()> {
    let output = runner
        .run(tool)
        .map_err(|_| CrushError::ToolMissing(tool.to_string()))?;
    if output.stdout.is_empty() {
        return Err(CrushError::ToolMissing(tool.to_string()));
    }
    Ok(())
}

/// `<source>_tmp`, kept next to the source.
pub fn temp_path_for(source: &Path) -> PathBuf {
    let mut name = OsString::from(source.as_os_str());
    name.push(TMP_FILENAME_APPEND);
    PathBuf::from(name)
}

/// Moves the crushed temp file over the original. A symlinked original
/// keeps its link; the crushed bytes are written through to the target.
fn replace_with(temp: &Path, original: &Path) -> Result<()> {
    if !temp.is_file() {
        return Err(CrushError::Finalize {
            path: original.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} was not written", temp.display()),
            ),
        });
    }
    let finalize = |source: io::Error| CrushError::Finalize {
        path: original.to_path_buf(),
        source,
    };

    let is_link = fs::symlink_metadata(original)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    if is_link {
        fs::copy(temp, original).map_err(finalize)?;
        return fs::remove_file(temp).map_err(finalize);
    }
    fs::rename(temp, original).map_err(finalize)
}

/// Single pass so a path containing a placeholder is never expanded twice.
fn fill_template(template: &str, source: &str, output: &str) -> String {
    let mut filled = String::with_capacity(template.len() + source.len() + output.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        filled.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{source}") {
            filled.push_str(source);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{output}") {
            filled.push_str(output);
            rest = after;
        } else {
            filled.push('{');
            rest = &tail[1..];
        }
    }
    filled.push_str(rest);
    filled
}
