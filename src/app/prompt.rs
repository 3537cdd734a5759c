use crate::app::error::AppError;
use std::io::{self, BufRead, Write};

/// Asks questions one line at a time over any reader/writer pair.
///
/// An empty answer picks the default. Invalid answers are reported and the
/// question is asked again.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn input(&mut self, message: &str, default: &str) -> Result<String, AppError> {
        self.input_with(message, default, |_| Ok(()))
    }

    pub fn input_with<F>(&mut self, message: &str, default: &str, validate: F) -> Result<String, AppError>
    where
        F: Fn(&str) -> Result<(), AppError>,
    {
        loop {
            let answer = self.ask(&format!("{} ({})", message, default))?;
            let answer = if answer.is_empty() {
                default.to_string()
            } else {
                answer
            };
            match validate(&answer) {
                Ok(()) => return Ok(answer),
                Err(e) => self.say(&format!("✖ {}", e))?,
            }
        }
    }

    pub fn confirm(&mut self, message: &str, default: bool) -> Result<bool, AppError> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            let answer = self.ask(&format!("{} ({})", message, hint))?;
            match answer.to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("✖ please answer y or n")?,
            }
        }
    }

    /// Returns the index of the chosen entry in `choices`.
    pub fn select(&mut self, message: &str, choices: &[&str], default: usize) -> Result<usize, AppError> {
        let listing = choices.join("/");
        let fallback = choices.get(default).copied().unwrap_or_default();
        loop {
            let answer = self.ask(&format!("{} [{}] ({})", message, listing, fallback))?;
            if answer.is_empty() {
                return Ok(default);
            }
            if let Some(index) = choices.iter().position(|c| c.eq_ignore_ascii_case(&answer)) {
                return Ok(index);
            }
            self.say(&format!("✖ choose one of: {}", listing))?;
        }
    }

    fn ask(&mut self, question: &str) -> Result<String, AppError> {
        write!(self.writer, "? {} ", question).map_err(AppError::Prompt)?;
        self.writer.flush().map_err(AppError::Prompt)?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(AppError::Prompt)?;
        if read == 0 {
            // Looping on a closed stream would never end.
            return Err(AppError::Prompt(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            )));
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, message: &str) -> Result<(), AppError> {
        writeln!(self.writer, "{}", message).map_err(AppError::Prompt)
    }
}
