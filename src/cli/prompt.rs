use crate::core::errors::HostpingError;
use std::io::{BufRead, Write};

/// Asks whether to use the predefined hosts. Anything other than
/// "y"/"yes" (any case) counts as no.
pub fn ask_use_predefined<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<bool, HostpingError> {
    let answer = ask(input, output, "Use predefined hosts? (yes/no): ")?;
    Ok(is_yes(&answer))
}

pub fn ask_host_list<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<String, HostpingError> {
    ask(input, output, "Enter hosts separated by commas: ")
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<String, HostpingError> {
    write!(output, "{}", question)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
