use std::collections::VecDeque;
use std::io::BufRead;

use crate::error::SolverError;

/// Whitespace-tokenizes a [`BufRead`] one line at a time, independent of where the judge
/// chooses to put line breaks within a block. Numbers are parsed lazily, on demand.
pub struct Words<R> {
    reader: R,
    buffered: VecDeque<String>,
}

impl<R: BufRead> Words<R> {
    pub fn new(reader: R) -> Words<R> {
        Words {
            reader,
            buffered: VecDeque::new(),
        }
    }

    fn refill(&mut self) -> Result<bool, SolverError> {
        let mut line = String::new();
        let bytes_read = self.reader.read_line(&mut line)?;
        if bytes_read == 0 {
            return Ok(false);
        }
        self.buffered.extend(line.split_whitespace().map(String::from));
        Ok(true)
    }

    pub fn next_word(&mut self) -> Result<String, SolverError> {
        while self.buffered.is_empty() {
            if !self.refill()? {
                return Err(SolverError::Protocol("unexpected end of judge input".into()));
            }
        }
        Ok(self.buffered.pop_front().expect("just checked non-empty"))
    }

    pub fn next_usize(&mut self) -> Result<usize, SolverError> {
        self.parse_next()
    }

    pub fn next_u32(&mut self) -> Result<u32, SolverError> {
        self.parse_next()
    }

    pub fn next_u64(&mut self) -> Result<u64, SolverError> {
        self.parse_next()
    }

    pub fn next_f64(&mut self) -> Result<f64, SolverError> {
        self.parse_next()
    }

    fn parse_next<T: std::str::FromStr>(&mut self) -> Result<T, SolverError> {
        let word = self.next_word()?;
        word.parse()
            .map_err(|_| SolverError::Protocol(format!("could not parse token {:?}", word)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn tokens_split_across_lines_read_in_order() {
        let mut words = Words::new(Cursor::new("4 2 20\n3\n1.5 7\n"));
        assert_eq!(words.next_usize().unwrap(), 4);
        assert_eq!(words.next_usize().unwrap(), 2);
        assert_eq!(words.next_usize().unwrap(), 20);
        assert_eq!(words.next_u32().unwrap(), 3);
        assert_eq!(words.next_f64().unwrap(), 1.5);
        assert_eq!(words.next_u32().unwrap(), 7);
    }

    #[test]
    fn running_out_of_input_is_a_protocol_error() {
        let mut words = Words::new(Cursor::new("1"));
        assert!(words.next_usize().is_ok());
        assert!(matches!(words.next_usize(), Err(SolverError::Protocol(_))));
    }

    #[test]
    fn unparseable_token_is_a_protocol_error() {
        let mut words = Words::new(Cursor::new("not-a-number"));
        assert!(matches!(words.next_u32(), Err(SolverError::Protocol(_))));
    }
}
