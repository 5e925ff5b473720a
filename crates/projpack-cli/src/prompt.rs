//! Line-oriented interactive prompts.

use projpack_core::{Error, Result};
use std::io::{BufRead, Write};

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter over the given input and output.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Print `question` and return the trimmed answer.
    ///
    /// Closed input is an error rather than an empty answer, so loops
    /// waiting for a valid choice terminate.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        self.say(question)?;
        self.read_answer()
    }

    /// Yes/no question; only `y` and `yes` count as yes.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(question)?.to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }

    /// Numbered menu; returns the zero-based index of the choice.
    pub fn choose<S: AsRef<str>>(&mut self, title: &str, options: &[S]) -> Result<usize> {
        self.say(title)?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, option.as_ref())?;
        }
        self.choose_index(options.len())
    }

    /// Re-prompt until a number in `1..=count` is entered.
    pub fn choose_index(&mut self, count: usize) -> Result<usize> {
        loop {
            write!(self.output, "Enter choice: ")?;
            self.output.flush()?;
            let answer = self.read_answer()?;
            match answer.parse::<usize>() {
                Ok(n) if n > 0 && n <= count => return Ok(n - 1),
                _ => self.say("Invalid selection. Try again.")?,
            }
        }
    }

    /// Like [`ask`](Self::ask), but closed input gives `None`.
    pub fn ask_or_closed(&mut self, question: &str) -> Result<Option<String>> {
        self.say(question)?;
        self.read_line()
    }

    fn read_answer(&mut self) -> Result<String> {
        self.read_line()?
            .ok_or_else(|| Error::Other("input closed before an answer was given".into()))
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Give back the output writer.
    pub fn into_output(self) -> W {
        self.output
    }
}
