//! A tiny Brainfuck virtual machine on a growable tape.
//!
//! This crate executes the eight-instruction Brainfuck language over a
//! byte-addressable memory tape that starts at 4 cells and doubles on demand
//! as the data pointer moves right. The left edge is a hard boundary.
//!
//! Features and behaviors:
//! - Cell arithmetic wraps modulo 256 (255 + 1 -> 0, 0 - 1 -> 255).
//! - The tape grows rightward without bound; moving left of cell 0 is an
//!   error.
//! - Input `,` consumes one byte from a caller-supplied slice; past the end
//!   of input the cell is set to 0 and the input cursor still advances.
//! - Output `.` appends the current cell to the returned byte buffer; the
//!   engine itself performs no console I/O.
//! - Nested loops `[]` are matched by on-demand scans; a scan that runs off
//!   the program is reported as an unmatched bracket.
//! - Any non-instruction character is a comment and is skipped.
//!
//! Quick start:
//!
//! ```
//! use bf_tape::Engine;
//!
//! // Classic "Hello World!" in Brainfuck
//! let code = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
//! let engine = Engine::new(code.to_string());
//! let output = engine.run(&[]).expect("program should run");
//! assert_eq!(output, b"Hello World!\n");
//! ```

pub mod cli_util;
pub mod engine;
pub mod tape;

pub use engine::{BracketKind, Engine, EngineError, StepControl};
pub use tape::{Tape, TapeError};
