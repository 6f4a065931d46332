//! Confirmation prompt

use std::io::{self, Write};

use anyhow::Result;

/// Ask the user a yes/no question, defaulting to no
///
/// Pipelines and other non-interactive invocations (no TTY on stdin) never
/// confirm a destructive action; they get `false` without a prompt.
pub fn confirm(question: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    Ok(is_affirmative(&answer))
}

/// Pressing Enter takes the default, which is no
fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_answers() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y\n"));
        assert!(is_affirmative("  yes  "));
        assert!(is_affirmative("YES"));
    }

    #[test]
    fn test_empty_input_declines() {
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("\n"));
    }

    #[test]
    fn test_other_answers_decline() {
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yeah"));
        assert!(!is_affirmative("ye"));
    }
}
