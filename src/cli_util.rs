use crate::EngineError;
use std::io::{self, Write};

/// Pretty-print a structured [`EngineError`] with caret positioning.
/// If `program` is `Some("bft")`, messages are prefixed with "bft: ...".
pub fn print_engine_error(program: Option<&str>, code: &str, err: &EngineError) {
    let prefix_program = |msg: &str| {
        if let Some(p) = program {
            format!("{p}: {msg}")
        } else {
            msg.to_string()
        }
    };

    match err {
        EngineError::Tape { ip, source } => {
            let msg = prefix_program(&format!("Runtime error: {source}"));
            print_error_with_context(&msg, code, *ip);
        }
        EngineError::UnmatchedBracket { ip, kind } => {
            let msg = prefix_program(&format!("Parse error: unmatched bracket {kind}"));
            print_error_with_context(&msg, code, *ip);
        }
        // Aborts carry no instruction position; the Display text is enough.
        EngineError::StepLimitExceeded { .. } | EngineError::Canceled => {
            eprintln!("{}", prefix_program(&err.to_string()));
            let _ = io::stderr().flush();
        }
    }
}

/// Print a concise error with instruction index and a caret context window.
/// Positions are char indices, so programs with non-ASCII comment text still
/// render correctly.
pub fn print_error_with_context(prefix: &str, code: &str, pos: usize) {
    eprintln!("{prefix} at instruction {pos}");

    // Show a short window around the position for context
    const WINDOW_CHARS: usize = 32;

    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let window: String = code
        .chars()
        .skip(start_char)
        .take(pos - start_char + WINDOW_CHARS + 1)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();

    eprintln!("  {}", window);

    // Caret under the exact position
    let caret_offset = pos - start_char;
    eprintln!("  {}^", " ".repeat(caret_offset));
    let _ = io::stderr().flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BracketKind;

    // The printers write to stderr, so these just exercise the paths for
    // panics and formatting of the underlying Display impls.
    #[test]
    fn bracket_kind_renders_as_the_literal_character() {
        assert_eq!(
            format!(
                "{}",
                EngineError::UnmatchedBracket {
                    ip: 3,
                    kind: BracketKind::Open,
                }
            ),
            "unmatched bracket '[' at instruction 3"
        );
    }

    #[test]
    fn context_window_handles_position_at_either_end() {
        print_error_with_context("err", "[", 0);
        print_error_with_context("err", "++++++[", 6);
        let long = "+".repeat(100) + "<";
        print_error_with_context("err", &long, 100);
    }
}
