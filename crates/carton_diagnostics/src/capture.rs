//! Thread-safe accumulator for recoverable build problems.

use crate::message::BuildMessage;
use std::sync::Mutex;

/// Label used for errors recorded when no job is active.
const ROOT_JOB: &str = "build";

/// One active job scope on the capture's job stack.
struct JobFrame {
    label: String,
    /// Errors recorded while this frame was on the stack, including errors
    /// recorded by jobs nested under it.
    error_count: usize,
}

struct CaptureState {
    messages: Vec<BuildMessage>,
    jobs: Vec<JobFrame>,
}

/// An accumulator for recoverable build problems, with named job scopes.
///
/// The handle itself is the capture: any code holding a `&BuildMessages`
/// is by construction inside a capture, so there is no ambient state to
/// assert against. Jobs nest; an error recorded in a nested job counts
/// toward every enclosing job, which lets a caller ask "did anything go
/// wrong while building this package?" after delegating to the compiler.
pub struct BuildMessages {
    inner: Mutex<CaptureState>,
}

impl BuildMessages {
    /// Creates a new empty capture.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CaptureState {
                messages: Vec::new(),
                jobs: Vec::new(),
            }),
        }
    }

    /// Runs `f` inside a fresh capture and returns its value along with
    /// every message recorded during the run.
    pub fn capture<T>(f: impl FnOnce(&BuildMessages) -> T) -> (T, Vec<BuildMessage>) {
        let messages = BuildMessages::new();
        let value = f(&messages);
        let collected = messages.take_all();
        (value, collected)
    }

    /// Runs `f` inside a named job scope nested under the current one.
    ///
    /// Errors recorded while `f` runs are attributed to this job (and
    /// counted toward every enclosing job).
    pub fn enter_job<T>(&self, label: impl Into<String>, f: impl FnOnce() -> T) -> T {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.jobs.push(JobFrame {
                label: label.into(),
                error_count: 0,
            });
        }
        let value = f();
        {
            let mut inner = self.inner.lock().unwrap();
            inner.jobs.pop();
        }
        value
    }

    /// Records a recoverable error against the innermost active job.
    ///
    /// The build continues; the caller decides how to degrade (for example
    /// by substituting an empty artifact).
    pub fn record_error(&self, message: impl Into<String>) {
        let mut inner = self.inner.lock().unwrap();
        for frame in &mut inner.jobs {
            frame.error_count += 1;
        }
        let job = inner
            .jobs
            .last()
            .map(|f| f.label.clone())
            .unwrap_or_else(|| ROOT_JOB.to_string());
        inner.messages.push(BuildMessage {
            job,
            message: message.into(),
        });
    }

    /// Returns `true` if any error has been recorded while the innermost
    /// active job was on the stack, including by jobs nested under it.
    ///
    /// Outside any job, reports whether the capture has any messages at all.
    pub fn has_errors_in_current_job(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        match inner.jobs.last() {
            Some(frame) => frame.error_count > 0,
            None => !inner.messages.is_empty(),
        }
    }

    /// Returns `true` if any error has been recorded in the capture.
    pub fn has_errors(&self) -> bool {
        !self.inner.lock().unwrap().messages.is_empty()
    }

    /// Returns the number of errors recorded so far.
    pub fn error_count(&self) -> usize {
        self.inner.lock().unwrap().messages.len()
    }

    /// Takes all accumulated messages, leaving the capture empty.
    pub fn take_all(&self) -> Vec<BuildMessage> {
        let mut inner = self.inner.lock().unwrap();
        std::mem::take(&mut inner.messages)
    }

    /// Returns a snapshot of all accumulated messages without draining.
    pub fn messages(&self) -> Vec<BuildMessage> {
        self.inner.lock().unwrap().messages.clone()
    }
}

impl Default for BuildMessages {
    fn default() -> Self {
        Self::new()
    }
}
