//! Interactive stdin implementation of the confirmation capability.

use std::io::{self, BufRead, Write};

use mintgen_core::Confirm;
use mintgen_core::confirm::parse_reply;

/// Asks on stdout, reads replies from stdin.
///
/// An empty reply takes the configured default; an unrecognized reply
/// re-prompts. EOF with a default configured takes the default, so a closed
/// stdin behaves like pressing enter rather than looping.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str, default: Option<bool>) -> io::Result<bool> {
        let suffix = match default {
            None => " [y/n] ",
            Some(true) => " [Y/n] ",
            Some(false) => " [y/N] ",
        };

        let stdin = io::stdin();
        let mut reply = String::new();
        loop {
            print!("{question}{suffix}");
            io::stdout().flush()?;

            reply.clear();
            if stdin.lock().read_line(&mut reply)? == 0 {
                // EOF
                return match default {
                    Some(answer) => Ok(answer),
                    None => Err(io::Error::other("stdin closed before a yes/no reply")),
                };
            }

            let trimmed = reply.trim();
            if trimmed.is_empty()
                && let Some(answer) = default
            {
                return Ok(answer);
            }
            match parse_reply(trimmed) {
                Some(answer) => return Ok(answer),
                None => println!("Please respond with 'yes' or 'no' (or 'y' or 'n')."),
            }
        }
    }
}
