use crate::machine::Machine;

/// The ordered fleet of machines plus the judge's feedback scalars for the most recently
/// read round.
#[derive(Debug, Clone)]
pub struct State {
    pub machines: Vec<Machine>,
    pub score: u64,
    pub no_violations: u64,
    pub no_delays: u64,
}

impl State {
    pub fn new(machines: Vec<Machine>) -> State {
        State {
            machines,
            score: 0,
            no_violations: 0,
            no_delays: 0,
        }
    }

    /// global change count: adjacent-week inequalities summed over both sides of every machine.
    pub fn total_changes(&self) -> u32 {
        self.machines.iter().map(Machine::total_changes).sum()
    }

    pub fn remaining_changes(&self, max_changes: u32) -> i64 {
        max_changes as i64 - self.total_changes() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_changes_can_go_negative_transiently() {
        let state = State::new(Vec::new());
        assert_eq!(state.remaining_changes(0), 0);
        assert_eq!(state.remaining_changes(5), 5);
    }
}
