//! The execution engine: instruction dispatch and loop control.
//!
//! An [`Engine`] holds an immutable program and executes it against a
//! caller-supplied input slice, producing an output byte buffer. Every call
//! to [`Engine::run`] owns a fresh [`Tape`] and fresh cursors, so nothing
//! persists between runs and separate runs never share mutable state.
//!
//! Loop brackets are resolved on demand with a nested-counting scan rather
//! than a precomputed jump table. The two are not equivalent for malformed
//! programs: a lone `]` on a zero cell is a no-op here, while eager
//! whole-program validation would reject it before the first instruction.

use std::fmt;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::tape::{Tape, TapeError};

/// Errors that can occur while executing a program.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The tape rejected an operation (left-boundary breach or bad value).
    #[error("tape fault at instruction {ip}: {source}")]
    Tape {
        ip: usize,
        #[source]
        source: TapeError,
    },

    /// A bracket scan ran off the end of the program without finding the
    /// structural partner of the bracket at `ip`.
    #[error("unmatched bracket {kind} at instruction {ip}")]
    UnmatchedBracket { ip: usize, kind: BracketKind },

    /// Execution aborted due to step limit.
    #[error("execution aborted: step limit exceeded ({limit})")]
    StepLimitExceeded { limit: usize },

    /// Execution aborted due to cooperative cancellation (e.g., timeout).
    #[error("execution aborted: cancelled")]
    Canceled,
}

/// Which side of the loop was unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

impl fmt::Display for BracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketKind::Open => write!(f, "'['"),
            BracketKind::Close => write!(f, "']'"),
        }
    }
}

/// Controls for cooperative cancellation and step limiting.
#[derive(Clone)]
pub struct StepControl {
    pub max_steps: Option<usize>,
    pub cancel_flag: Arc<AtomicBool>,
}

impl StepControl {
    pub fn new(max_steps: Option<usize>, cancel_flag: Arc<AtomicBool>) -> Self {
        Self {
            max_steps,
            cancel_flag,
        }
    }
}

/// A Brainfuck execution engine over a growable tape.
///
/// Only the eight characters `> < + - . , [ ]` are instructions; everything
/// else in the program text is inert and skipped, so programs may carry
/// comments and whitespace freely.
pub struct Engine {
    code: String,
}

impl Engine {
    /// Create an engine for the given program text.
    pub fn new(code: String) -> Self {
        Self { code }
    }

    /// Execute the program against `input`, returning the produced output.
    ///
    /// `input` supplies the bytes consumed by `,`; once it is exhausted,
    /// each further `,` stores 0 (and still consumes one input position).
    /// An empty program returns an empty output.
    pub fn run(&self, input: &[u8]) -> Result<Vec<u8>, EngineError> {
        self.execute(input, None)
    }

    /// Execute with cooperative cancellation and an optional step limit.
    ///
    /// The cancel flag and the step budget are checked once per dispatched
    /// instruction, so a caller can bound wall-clock time or total work
    /// without touching the core semantics.
    pub fn run_with_control(
        &self,
        input: &[u8],
        control: StepControl,
    ) -> Result<Vec<u8>, EngineError> {
        self.execute(input, Some(&control))
    }

    fn execute(
        &self,
        input: &[u8],
        control: Option<&StepControl>,
    ) -> Result<Vec<u8>, EngineError> {
        let chars: Vec<char> = self.code.chars().collect();
        let code_len = chars.len();

        let mut tape = Tape::new();
        let mut output: Vec<u8> = Vec::new();
        let mut input_cursor = 0usize;
        let mut ip = 0usize;
        let mut step = 0usize;

        while ip < code_len {
            if let Some(ctrl) = control {
                if ctrl.cancel_flag.load(Ordering::Relaxed) {
                    return Err(EngineError::Canceled);
                }
                if let Some(max) = ctrl.max_steps {
                    if step >= max {
                        return Err(EngineError::StepLimitExceeded { limit: max });
                    }
                }
            }

            match chars[ip] {
                '>' => tape.increment_pointer(),
                '<' => tape
                    .decrement_pointer()
                    .map_err(|source| EngineError::Tape { ip, source })?,
                '+' => tape.increment_cell(),
                '-' => tape.decrement_cell(),
                '.' => output.push(tape.get_cell()),
                ',' => {
                    // Exhausted input reads as 0; the cursor advances either
                    // way, one position per ',' executed.
                    let byte = input.get(input_cursor).copied().unwrap_or(0);
                    tape.set_cell(u16::from(byte))
                        .map_err(|source| EngineError::Tape { ip, source })?;
                    input_cursor += 1;
                }
                '[' => {
                    if tape.get_cell() == 0 {
                        ip = scan_forward(&chars, ip)?;
                    }
                }
                ']' => {
                    if tape.get_cell() != 0 {
                        ip = scan_backward(&chars, ip)?;
                    }
                }
                // Anything else is a comment character.
                _ => {}
            }

            step += 1;
            ip += 1;
        }

        Ok(output)
    }
}

/// Locate the `]` matching the `[` at `open`.
///
/// Returns the index of the matching `]`; the dispatch loop's uniform `+1`
/// advance then lands just past it.
fn scan_forward(chars: &[char], open: usize) -> Result<usize, EngineError> {
    let mut depth = 1usize;
    let mut ip = open;
    while depth > 0 {
        ip += 1;
        if ip >= chars.len() {
            return Err(EngineError::UnmatchedBracket {
                ip: open,
                kind: BracketKind::Open,
            });
        }
        match chars[ip] {
            ']' => depth -= 1,
            '[' => depth += 1,
            _ => {}
        }
    }
    Ok(ip)
}

/// Locate the `[` matching the `]` at `close`.
///
/// Returns the index of the matching `[`; the subsequent `+1` advance
/// re-enters the loop body.
fn scan_backward(chars: &[char], close: usize) -> Result<usize, EngineError> {
    let mut depth = 1usize;
    let mut ip = close;
    while depth > 0 {
        if ip == 0 {
            return Err(EngineError::UnmatchedBracket {
                ip: close,
                kind: BracketKind::Close,
            });
        }
        ip -= 1;
        match chars[ip] {
            '[' => depth -= 1,
            ']' => depth += 1,
            _ => {}
        }
    }
    Ok(ip)
}
