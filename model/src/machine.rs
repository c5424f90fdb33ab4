use crate::pattern::PatternCode;
use crate::side::Side;

/// A single resource's weekly pattern arrays and unit pattern costs, plus the load/delay
/// feedback most recently reported by the judge.
#[derive(Debug, Clone)]
pub struct Machine {
    weekday_pattern: Vec<PatternCode>,
    weekend_pattern: Vec<PatternCode>,
    weekday_unit_cost: [f64; 9],
    weekend_unit_cost: [f64; 9],
    pub load: Vec<f64>,
    pub delay: Vec<u32>,
}

impl Machine {
    /// both sides start filled with the richest pattern (code 9), the safest starting point
    /// before any judge feedback has been observed.
    pub fn new(weeks: usize, weekday_unit_cost: [f64; 9], weekend_unit_cost: [f64; 9]) -> Machine {
        Machine {
            weekday_pattern: vec![PatternCode::MAX; weeks],
            weekend_pattern: vec![PatternCode::MAX; weeks],
            weekday_unit_cost,
            weekend_unit_cost,
            load: vec![0.0; weeks],
            delay: vec![0; weeks],
        }
    }

    pub fn weeks(&self) -> usize {
        self.weekday_pattern.len()
    }

    pub fn pattern(&self, side: Side) -> &[PatternCode] {
        match side {
            Side::WeekDay => &self.weekday_pattern,
            Side::WeekEnd => &self.weekend_pattern,
        }
    }

    pub fn pattern_mut(&mut self, side: Side) -> &mut Vec<PatternCode> {
        match side {
            Side::WeekDay => &mut self.weekday_pattern,
            Side::WeekEnd => &mut self.weekend_pattern,
        }
    }

    pub fn unit_cost(&self, side: Side) -> &[f64; 9] {
        match side {
            Side::WeekDay => &self.weekday_unit_cost,
            Side::WeekEnd => &self.weekend_unit_cost,
        }
    }

    /// highest week index whose pattern is not shut down, or `None` if the whole side is
    /// shut down.
    pub fn last_operating_week(&self, side: Side) -> Option<usize> {
        self.pattern(side).iter().rposition(|code| !code.is_shutdown())
    }

    /// number of adjacent weeks with differing pattern codes, one side.
    pub fn changes(&self, side: Side) -> u32 {
        self.pattern(side)
            .windows(2)
            .filter(|pair| pair[0] != pair[1])
            .count() as u32
    }

    pub fn total_changes(&self) -> u32 {
        self.changes(Side::WeekDay) + self.changes(Side::WeekEnd)
    }

    pub fn set_feedback(&mut self, load: Vec<f64>, delay: Vec<u32>) {
        debug_assert_eq!(load.len(), self.weeks());
        debug_assert_eq!(delay.len(), self.weeks());
        self.load = load;
        self.delay = delay;
    }

    pub fn total_delay(&self) -> u32 {
        self.delay.iter().sum()
    }
}
