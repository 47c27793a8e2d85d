use std::io::{BufRead, Write};

/// Asks `question` on `output` and reads lines from `input` until `valid`
/// accepts one. Each rejected answer repeats the `retry` line, matching the
/// interactive flow the catalog commands rely on when neither the manifest
/// nor the config file can answer for the user.
pub fn prompt_value<R, W>(
    input: &mut R,
    output: &mut W,
    question: &str,
    retry: &str,
    valid: impl Fn(&str) -> bool,
) -> std::io::Result<String>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{question}")?;
    output.flush()?;
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed before a value was provided",
            ));
        }
        let answer = line.trim();
        if valid(answer) {
            return Ok(answer.to_string());
        }
        writeln!(output, "{retry}")?;
        output.flush()?;
    }
}
