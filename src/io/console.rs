//! Line-oriented reader for interactive prompts
//!
//! Every read consumes exactly one whole input line. When a line does not
//! parse, it has already been consumed in full, so stray characters can never
//! leak into the answer to the next prompt. `12abc` is therefore rejected as
//! a whole instead of being read as `12` followed by a bad `abc`. Bytes that
//! are not valid UTF-8 are decoded lossily, so such a line is just another
//! answer that fails to parse.

use crate::types::AtmError;
use std::io::BufRead;
use std::str::FromStr;

/// Result of reading one answer from the console
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<T> {
    /// The line parsed successfully
    Value(T),
    /// The line did not parse; carries the trimmed text that was rejected
    Invalid(String),
    /// Input is closed
    Eof,
}

/// Line-oriented console reader
#[derive(Debug)]
pub struct LineInput<R> {
    reader: R,
    raw: Vec<u8>,
    line: String,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            raw: Vec::new(),
            line: String::new(),
        }
    }

    /// Read the next line without its terminator
    ///
    /// # Returns
    ///
    /// * `Ok(Some(line))` for every line, including empty ones
    /// * `Ok(None)` once input is exhausted
    pub fn read_line(&mut self) -> Result<Option<&str>, AtmError> {
        self.raw.clear();
        if self.reader.read_until(b'\n', &mut self.raw)? == 0 {
            return Ok(None);
        }
        self.line = String::from_utf8_lossy(&self.raw).into_owned();
        Ok(Some(self.line.trim_end_matches(['\r', '\n'])))
    }

    /// Read the next line and parse its trimmed content as `T`
    ///
    /// The whole line is discarded on failure.
    pub fn read_parsed<T: FromStr>(&mut self) -> Result<ReadOutcome<T>, AtmError> {
        let Some(line) = self.read_line()? else {
            return Ok(ReadOutcome::Eof);
        };

        let trimmed = line.trim();
        Ok(match trimmed.parse::<T>() {
            Ok(value) => ReadOutcome::Value(value),
            Err(_) => ReadOutcome::Invalid(trimmed.to_string()),
        })
    }
}
