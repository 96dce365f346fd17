//! Terminal prompts

use std::io::{self, BufRead, Write};

use crate::backup::Confirm;

/// Confirmation prompt reading an answer from stdin
///
/// Anything other than `y`/`yes` (case-insensitive) declines, so a plain
/// Enter is a safe "no".
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Read one line of selection input from stdin
pub fn read_selection(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();

    let mut input = String::new();
    let _ = io::stdin().lock().read_line(&mut input);
    input.trim().to_string()
}
