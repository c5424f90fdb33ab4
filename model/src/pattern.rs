use derive_more::Display;

/// A weekly operating-pattern code in `1..=9`. Code 1 means "shut down", code 9 is the
/// richest (most expensive) operating pattern.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatternCode(u8);

impl PatternCode {
    pub const MIN: PatternCode = PatternCode(1);
    pub const MAX: PatternCode = PatternCode(9);

    pub fn new(code: u8) -> PatternCode {
        debug_assert!(
            (1..=9).contains(&code),
            "pattern code {} out of range [1,9]",
            code
        );
        PatternCode(code)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// index into a `[f64; 9]` unit-cost table (code 1 is index 0, code 9 is index 8).
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn is_shutdown(self) -> bool {
        self.0 == 1
    }

    /// one pattern code cheaper, or `None` if already shut down. Move generators only ever
    /// take a single step at a time.
    pub fn step_down(self) -> Option<PatternCode> {
        if self.0 > 1 {
            Some(PatternCode(self.0 - 1))
        } else {
            None
        }
    }
}
