/// A machine exposes two independent per-week pattern series: the weekday side and the
/// weekend side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    WeekDay,
    WeekEnd,
}

impl Side {
    /// matches the digit position used in the judge grid: character `2w` is the weekday
    /// code, `2w+1` is the weekend code.
    pub fn code(self) -> u8 {
        match self {
            Side::WeekDay => 0,
            Side::WeekEnd => 1,
        }
    }
}
