/// Line-oriented input sources for the console menu
use crate::domain::validation;
use std::io::{self, BufRead, Write};

/// What an answer has to look like before `ask` accepts it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    Text,
    Email,
}

/// The input the menu needs: validated answers, a choice from a list, and a
/// place to print. `Ok(None)` from either question means the input ran out.
pub trait InputSource {
    /// Ask until a non-blank answer arrives. For `AnswerKind::Email` the answer
    /// must also be a valid email address. Answers come back trimmed.
    fn ask(&mut self, request: &str, kind: AnswerKind) -> io::Result<Option<String>>;

    /// Let the user pick one of `options`, returning its index
    fn select(&mut self, message: &str, options: &[&str]) -> io::Result<Option<usize>>;

    fn say(&mut self, text: &str) -> io::Result<()>;
}

/// `InputSource` over any reader and writer, normally stdin and stdout.
///
/// Options are picked by number or by name, case-insensitively.
pub struct ConsolePrompt<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ConsolePrompt { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> InputSource for ConsolePrompt<R, W> {
    fn ask(&mut self, request: &str, kind: AnswerKind) -> io::Result<Option<String>> {
        loop {
            write!(self.output, "{}", request)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            let answer = line.trim();

            if answer.is_empty() {
                writeln!(
                    self.output,
                    "[Invalid Input]: value can't be empty, or only contains whitespace, entered value = '{}'",
                    answer
                )?;
                continue;
            }

            if kind == AnswerKind::Email && !validation::is_email(answer) {
                writeln!(
                    self.output,
                    "[INVALID INPUT]: Received invalid email, entered value = '{}'",
                    answer
                )?;
                continue;
            }

            return Ok(Some(answer.to_string()));
        }
    }

    fn select(&mut self, message: &str, options: &[&str]) -> io::Result<Option<usize>> {
        if options.is_empty() {
            return Ok(None);
        }

        writeln!(self.output, "{}", message)?;
        for (index, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {}", index + 1, option)?;
        }

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            let choice = line.trim();

            if let Ok(number) = choice.parse::<usize>() {
                if (1..=options.len()).contains(&number) {
                    return Ok(Some(number - 1));
                }
            }
            if let Some(index) = options
                .iter()
                .position(|option| option.eq_ignore_ascii_case(choice))
            {
                return Ok(Some(index));
            }

            writeln!(self.output, "Not a valid choice")?;
        }
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }
}
