use model::State;

use crate::part::Part;

/// An ordered, named group of parts applied and undone atomically. Moves with identical
/// structural identity (same parts, in the same order) are the same candidate, regardless of
/// their `name`.
#[derive(Debug, Clone)]
pub struct Move {
    pub name: String,
    pub parts: Vec<Part>,
    pub delta: f64,
}

impl Move {
    pub fn new(name: impl Into<String>, parts: Vec<Part>) -> Move {
        let delta = parts.iter().map(|part| part.delta).sum();
        Move {
            name: name.into(),
            parts,
            delta,
        }
    }

    /// concatenation of each part's `machine-week-side-from-to`, in push order, separated by
    /// `_`. This is the blacklist key; generators must never reorder parts after construction.
    pub fn identity(&self) -> String {
        self.parts
            .iter()
            .map(Part::identity_fragment)
            .collect::<Vec<_>>()
            .join("_")
    }

    pub fn apply(&self, state: &mut State) {
        for part in &self.parts {
            part.apply(state);
        }
    }

    pub fn undo(&self, state: &mut State) {
        for part in &self.parts {
            part.undo(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{Machine, PatternCode, Side};

    fn two_week_state() -> State {
        let costs_wd = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0];
        let costs_we = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        State::new(vec![Machine::new(2, costs_wd, costs_we)])
    }

    #[test]
    fn identity_is_order_sensitive_and_name_independent() {
        let state = two_week_state();
        let p0 = Part::week_day(&state, 0, 0, PatternCode::new(8));
        let p1 = Part::week_end(&state, 0, 1, PatternCode::new(8));

        let named_a = Move::new("A", vec![p0, p1]);
        let named_b = Move::new("B", vec![p0, p1]);
        assert_eq!(named_a.identity(), named_b.identity());

        let reversed = Move::new("A", vec![p1, p0]);
        assert_ne!(named_a.identity(), reversed.identity());
    }

    #[test]
    fn apply_then_undo_restores_every_part() {
        let mut state = two_week_state();
        let before_wd = state.machines[0].pattern(Side::WeekDay).to_vec();
        let before_we = state.machines[0].pattern(Side::WeekEnd).to_vec();

        let parts = vec![
            Part::week_day(&state, 0, 0, PatternCode::new(8)),
            Part::week_end(&state, 0, 1, PatternCode::new(7)),
        ];
        let mv = Move::new("Test", parts);

        mv.apply(&mut state);
        assert_ne!(state.machines[0].pattern(Side::WeekDay), before_wd.as_slice());

        mv.undo(&mut state);
        assert_eq!(state.machines[0].pattern(Side::WeekDay), before_wd.as_slice());
        assert_eq!(state.machines[0].pattern(Side::WeekEnd), before_we.as_slice());
    }

    #[test]
    fn aggregate_delta_is_sum_of_parts() {
        let state = two_week_state();
        let parts = vec![
            Part::week_day(&state, 0, 0, PatternCode::new(8)), // 90-80=10
            Part::week_end(&state, 0, 1, PatternCode::new(7)), // 9-7=2
        ];
        let mv = Move::new("Test", parts);
        assert_eq!(mv.delta, 12.0);
    }
}
