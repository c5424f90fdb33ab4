use model::{PatternCode, Side, State};

/// A single slot rewrite: one `(machine, week, side)` pattern value going from `from` to `to`.
/// Applying writes `to` into the indexed slot; undoing writes `from` back. Applying or undoing
/// the same part twice is undefined.
#[derive(Debug, Clone, Copy)]
pub struct Part {
    pub machine: usize,
    pub week: usize,
    pub side: Side,
    pub from: PatternCode,
    pub to: PatternCode,
    pub delta: f64,
}

impl Part {
    /// snapshots `from` from the current state and computes `delta = unitCost[from] -
    /// unitCost[to]`, the cost-improvement of making this change.
    pub fn new(state: &State, machine: usize, week: usize, side: Side, to: PatternCode) -> Part {
        let m = &state.machines[machine];
        let from = m.pattern(side)[week];
        let unit_cost = m.unit_cost(side);
        let delta = unit_cost[from.index()] - unit_cost[to.index()];
        Part {
            machine,
            week,
            side,
            from,
            to,
            delta,
        }
    }

    pub fn week_day(state: &State, machine: usize, week: usize, to: PatternCode) -> Part {
        Part::new(state, machine, week, Side::WeekDay, to)
    }

    pub fn week_end(state: &State, machine: usize, week: usize, to: PatternCode) -> Part {
        Part::new(state, machine, week, Side::WeekEnd, to)
    }

    pub fn apply(&self, state: &mut State) {
        state.machines[self.machine].pattern_mut(self.side)[self.week] = self.to;
    }

    pub fn undo(&self, state: &mut State) {
        state.machines[self.machine].pattern_mut(self.side)[self.week] = self.from;
    }

    /// `machine-week-sideCode-from-to`, the building block of a move's structural identity.
    pub fn identity_fragment(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            self.machine,
            self.week,
            self.side.code(),
            self.from.value(),
            self.to.value()
        )
    }
}
