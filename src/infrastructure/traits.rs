//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io::{self, BufRead, Write};
use std::process::Output;

use colored::Colorize;

use crate::domain::Row;

/// Source of input rows (spreadsheet export).
pub trait RowSource {
    /// Read all data rows, header excluded, in input order.
    fn read_rows(&self) -> io::Result<Vec<Row>>;
}

/// Provider of OAuth bearer tokens for the policy API.
pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> io::Result<String>;
}

/// Outbound JSON POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub bearer_token: String,
    pub body: String,
}

/// Status and body text of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Blocking HTTP client abstraction.
pub trait HttpClient: Send + Sync {
    /// Send a POST; any received status is `Ok`, only transport failures are `Err`.
    fn post_json(&self, request: &HttpRequest) -> io::Result<HttpResponse>;
}

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command with arguments.
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output>;
}

/// Interactive yes/no confirmation.
pub trait Prompter: Send + Sync {
    /// Returns true only on an explicit yes.
    fn confirm(&self, message: &str) -> io::Result<bool>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        std::process::Command::new(cmd).args(args).output()
    }
}

/// Confirmation on the terminal: prompt on stderr, answer from stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> io::Result<bool> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        confirm_with(&mut input, &mut io::stderr(), message)
    }
}

/// Write the prompt to `out` and read one answer line from `input`.
///
/// `y` and `yes` (any case) confirm; anything else, including EOF, declines.
pub fn confirm_with<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> io::Result<bool> {
    write!(out, "{} ", format!("{message} [y/N]").cyan())?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    #[case("y\n", true)]
    #[case("YES\n", true)]
    #[case(" yes \n", true)]
    #[case("n\n", false)]
    #[case("\n", false)]
    #[case("", false)]
    #[case("sure\n", false)]
    fn given_answer_when_confirming_then_only_yes_confirms(
        #[case] answer: &str,
        #[case] expected: bool,
    ) {
        let mut input = Cursor::new(answer.as_bytes().to_vec());
        let mut out = Vec::new();
        let confirmed = confirm_with(&mut input, &mut out, "Overwrite?").unwrap();
        assert_eq!(confirmed, expected);
        assert!(String::from_utf8_lossy(&out).contains("Overwrite? [y/N]"));
    }
}
