//! Scoped capture of the process standard streams
//!
//! Long-running solvers tend to flood the console. `Capturing` swaps the
//! process file descriptors for stdout and stderr with temporary files
//! for the lifetime of the scope, then restores the originals and hands
//! the collected lines back. Restoration also runs on drop, so the
//! streams come back even when the scope unwinds through a panic.
//!
//! The redirect happens at file-descriptor level, so output from child
//! processes and C libraries is caught, not just Rust-side writes.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::os::unix::io::AsRawFd;
use thiserror::Error;

/// Errors from stream capture
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Setting up the redirected descriptors failed
    #[error("failed to redirect standard streams: {0}")]
    Redirect(#[source] io::Error),

    /// Swapping the original descriptors back failed
    #[error("failed to restore standard streams: {0}")]
    Restore(#[source] io::Error),

    /// Reading the captured content back failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Active stream capture scope
///
/// Created with [`Capturing::start`]; collected lines are returned by
/// [`Capturing::finish`], stdout lines first, then stderr lines.
#[derive(Debug)]
pub struct Capturing {
    lines: Vec<String>,
    redirect: Option<Redirect>,
}

#[derive(Debug)]
struct Redirect {
    saved_stdout: libc::c_int,
    saved_stderr: libc::c_int,
    stdout_sink: File,
    stderr_sink: File,
}

impl Capturing {
    /// Redirect stdout and stderr into temporary sinks
    pub fn start() -> CaptureResult<Self> {
        // Anything already buffered belongs to the caller, not the scope.
        io::stdout().flush().map_err(CaptureError::Redirect)?;
        io::stderr().flush().map_err(CaptureError::Redirect)?;

        let stdout_sink = tempfile::tempfile().map_err(CaptureError::Redirect)?;
        let stderr_sink = tempfile::tempfile().map_err(CaptureError::Redirect)?;

        let saved_stdout = dup(libc::STDOUT_FILENO).map_err(CaptureError::Redirect)?;
        let saved_stderr = match dup(libc::STDERR_FILENO) {
            Ok(fd) => fd,
            Err(err) => {
                close(saved_stdout);
                return Err(CaptureError::Redirect(err));
            }
        };

        let redirected = dup2(stdout_sink.as_raw_fd(), libc::STDOUT_FILENO)
            .and_then(|_| dup2(stderr_sink.as_raw_fd(), libc::STDERR_FILENO));
        if let Err(err) = redirected {
            // Undo whatever went through before failing out.
            let _ = dup2(saved_stdout, libc::STDOUT_FILENO);
            let _ = dup2(saved_stderr, libc::STDERR_FILENO);
            close(saved_stdout);
            close(saved_stderr);
            return Err(CaptureError::Redirect(err));
        }

        Ok(Self {
            lines: Vec::new(),
            redirect: Some(Redirect {
                saved_stdout,
                saved_stderr,
                stdout_sink,
                stderr_sink,
            }),
        })
    }

    /// Restore the original streams and return the collected lines
    pub fn finish(mut self) -> CaptureResult<Vec<String>> {
        self.restore_and_collect()?;
        Ok(std::mem::take(&mut self.lines))
    }

    /// Lines collected so far (populated once the scope ends)
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn restore_and_collect(&mut self) -> CaptureResult<()> {
        let Some(mut redirect) = self.redirect.take() else {
            return Ok(());
        };

        // Push buffered Rust-side writes into the sinks before swapping.
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();

        let restored = dup2(redirect.saved_stdout, libc::STDOUT_FILENO)
            .and(dup2(redirect.saved_stderr, libc::STDERR_FILENO));
        close(redirect.saved_stdout);
        close(redirect.saved_stderr);
        restored.map_err(CaptureError::Restore)?;

        self.lines.extend(read_lines(&mut redirect.stdout_sink)?);
        self.lines.extend(read_lines(&mut redirect.stderr_sink)?);
        Ok(())
    }
}

impl Drop for Capturing {
    fn drop(&mut self) {
        // Restoration must survive every exit path; errors here have
        // nowhere to go.
        let _ = self.restore_and_collect();
    }
}

fn read_lines(sink: &mut File) -> io::Result<Vec<String>> {
    let mut content = String::new();
    sink.seek(SeekFrom::Start(0))?;
    sink.read_to_string(&mut content)?;
    Ok(content.lines().map(str::to_owned).collect())
}

fn dup(fd: libc::c_int) -> io::Result<libc::c_int> {
    let duplicated = unsafe { libc::dup(fd) };
    if duplicated < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(duplicated)
}

fn dup2(src: libc::c_int, dst: libc::c_int) -> io::Result<()> {
    if unsafe { libc::dup2(src, dst) } < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

fn close(fd: libc::c_int) {
    unsafe {
        libc::close(fd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A single test exercises the whole lifecycle: parallel tests would
    // race over the process-wide descriptors.
    #[test]
    fn test_capture_collects_and_restores() {
        let capture = Capturing::start().unwrap();

        // Write through the raw handles: the fd swap catches these.
        write!(io::stdout(), "solver step 1\nsolver step 2\n").unwrap();
        io::stdout().flush().unwrap();
        write!(io::stderr(), "solver warning\n").unwrap();
        io::stderr().flush().unwrap();

        let lines = capture.finish().unwrap();
        // The test harness may interleave its own progress output on the
        // real descriptors, so assert containment and relative order
        // rather than exact content.
        let position = |needle: &str| {
            lines
                .iter()
                .position(|line| line == needle)
                .unwrap_or_else(|| panic!("missing captured line: {needle}"))
        };
        assert!(position("solver step 1") < position("solver step 2"));
        // stdout content comes before stderr content.
        assert!(position("solver step 2") < position("solver warning"));

        // Streams are usable again after the scope ends.
        write!(io::stdout(), "").unwrap();
        io::stdout().flush().unwrap();

        // Dropping without finish still restores; a fresh scope works.
        {
            let _early = Capturing::start().unwrap();
            write!(io::stdout(), "discarded\n").unwrap();
            io::stdout().flush().unwrap();
        }
        let again = Capturing::start().unwrap();
        write!(io::stdout(), "second scope\n").unwrap();
        io::stdout().flush().unwrap();
        let collected = again.finish().unwrap();
        assert!(collected.contains(&"second scope".to_string()));
        assert!(!collected.contains(&"discarded".to_string()));
    }

    #[test]
    fn test_capture_error_display() {
        let err = CaptureError::Redirect(io::Error::new(io::ErrorKind::Other, "no fds"));
        assert!(err.to_string().contains("redirect"));
    }
}
