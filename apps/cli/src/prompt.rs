//! Interactive rating input.

use askme_core::Quality;
use std::io::{BufRead, Write};
use thiserror::Error;

pub const RATING_PROMPT: &str = "Enter your rating (1-5, 1 is hard, 5 is easy): ";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed before a rating was entered")]
    Closed,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Ask until a valid rating is entered.
pub fn read_rating<R, W>(input: &mut R, output: &mut W) -> Result<Quality, PromptError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    loop {
        write!(output, "{RATING_PROMPT}")?;
        output.flush()?;

        let mut raw = Vec::new();
        if input.read_until(b'\n', &mut raw)? == 0 {
            return Err(PromptError::Closed);
        }
        let line = String::from_utf8_lossy(&raw);

        match line.parse::<Quality>() {
            Ok(quality) => return Ok(quality),
            Err(_) => writeln!(output, "{:?} is not a valid choice", line.trim())?,
        }
    }
}
