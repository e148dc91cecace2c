//! Call-stack tracking for the evaluator.
//!
//! `CallStack` records the name of every active user call. It enforces the
//! recursion limit on `push()` and snapshots itself into an
//! `EvalBacktrace` when a runtime error leaves a call.

use crate::errors::{recursion_limit_exceeded, EvalBacktrace, EvalError};

/// Most entries a captured backtrace keeps after collapsing repeats.
pub const MAX_BACKTRACE_FRAMES: usize = 32;

/// Live call stack for the interpreter.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<String>,
    max_depth: usize,
}

impl CallStack {
    /// Create a new empty call stack with the given depth limit.
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// The frame is NOT pushed on overflow.
    pub fn push(&mut self, name: impl Into<String>) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(recursion_limit_exceeded(self.max_depth));
        }
        self.frames.push(name.into());
        Ok(())
    }

    /// Pop the most recent call frame.
    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    /// Current call depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Snapshot of the stack, most recent call first.
    ///
    /// Consecutive calls to the same function collapse into one entry
    /// (`f (x3)`). At most `MAX_BACKTRACE_FRAMES` entries are kept; the
    /// rest are summarized in a final `... N more` entry.
    pub fn capture(&self) -> EvalBacktrace {
        let mut entries: Vec<(&str, usize)> = Vec::new();
        for name in self.frames.iter().rev() {
            if let Some((last, count)) = entries.last_mut() {
                if *last == name.as_str() {
                    *count += 1;
                    continue;
                }
            }
            entries.push((name.as_str(), 1));
        }
        let omitted: usize = entries
            .iter()
            .skip(MAX_BACKTRACE_FRAMES)
            .map(|(_, count)| count)
            .sum();
        let mut frames: Vec<String> = entries
            .into_iter()
            .take(MAX_BACKTRACE_FRAMES)
            .map(|(name, count)| match count {
                1 => name.to_string(),
                n => format!("{name} (x{n})"),
            })
            .collect();
        if omitted > 0 {
            frames.push(format!("... {omitted} more"));
        }
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace unless the error already carries one.
    ///
    /// The first boundary an error crosses is the innermost, so the
    /// snapshot taken there is the most complete.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if err.backtrace.is_some() || self.frames.is_empty() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}
