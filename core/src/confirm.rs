//! Yes/no confirmation capability.
//!
//! The generator asks exactly one question (reuse of an existing target
//! directory). The question is asked through this trait so that automated
//! callers and tests never touch a terminal.

use std::io;

/// An injectable yes/no question.
///
/// `default` is the answer implied by an empty reply; `None` means a reply
/// is required.
pub trait Confirm {
    fn confirm(&mut self, question: &str, default: Option<bool>) -> io::Result<bool>;
}

/// Answers every question with yes. Backs non-interactive invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _question: &str, _default: Option<bool>) -> io::Result<bool> {
        Ok(true)
    }
}

/// Interpret one reply line.
///
/// Accepts (case-insensitively) `yes`/`y`/`ye` and `no`/`n`; anything else
/// is not an answer and callers should re-prompt.
pub fn parse_reply(reply: &str) -> Option<bool> {
    match reply.to_ascii_lowercase().as_str() {
        "yes" | "y" | "ye" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}
