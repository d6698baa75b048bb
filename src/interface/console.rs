//! Line-based prompt I/O over any reader/writer pair.

use std::io::{self, BufRead, Write};

use crate::domain::error::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),

    /// 入力がEOFに達した
    #[error("input closed")]
    Closed,
}

pub struct Console<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Console<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// 1行出力する。
    pub fn say(&mut self, text: &str) -> Result<(), ConsoleError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// プロンプトを表示して1行読む。行末の改行は除く。
    pub fn ask(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::Closed);
        }
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(line)
    }

    /// 検証に通るまで同じプロンプトで聞き直す。
    pub fn ask_until<T>(
        &mut self,
        prompt: &str,
        validate: impl Fn(&str) -> Result<T, ValidationError>,
    ) -> Result<T, ConsoleError> {
        loop {
            let answer = self.ask(prompt)?;
            match validate(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => self.say(&e.to_string())?,
            }
        }
    }

    pub fn into_output(self) -> O {
        self.output
    }
}
