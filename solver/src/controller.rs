//! Hill-climbing controller (spec component C5): owns the accept/revert decision around
//! whatever move the generator offers, and hands the next move to apply back to the caller.

use std::collections::HashSet;

use model::{Config, State};
use moves::Move;

use crate::generator::{generate, GeneratorContext};

/// Drives the search: each call to [`Controller::step`] judges the move applied in the
/// previous round against the feedback now reflected in `state`, reverts it (blacklisting its
/// identity) if it made things worse, then picks and applies the next move.
pub struct Controller {
    best_score: u64,
    last_move: Option<Move>,
    bad_moves: HashSet<String>,
    reduce_global_failed: bool,
    interaction_index: u32,
    repair_enabled: bool,
}

impl Controller {
    pub fn new(repair_enabled: bool) -> Controller {
        Controller {
            best_score: 0,
            last_move: None,
            bad_moves: HashSet::new(),
            reduce_global_failed: false,
            // round 1's emission (the all-9s grid) is produced before any `step` call; the
            // first `step` call builds round 2's emission, so the counter starts at 1 and is
            // incremented before use.
            interaction_index: 1,
            repair_enabled,
        }
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn reduce_global_failed(&self) -> bool {
        self.reduce_global_failed
    }

    /// Judges the outcome of the previously applied move against `state`'s freshly-updated
    /// feedback, then generates and applies the next move. Returns the move just applied, or
    /// `None` if the generator offered nothing usable this round.
    pub fn step(&mut self, state: &mut State, cfg: &Config) -> Option<Move> {
        self.best_score = self.best_score.max(state.score);

        if let Some(mv) = self.last_move.take() {
            let regressed = state.no_delays > 0 || state.score < self.best_score;
            if regressed {
                let repaired = self.repair_enabled && self.try_partial_repair(&mv, state, cfg);
                if !repaired {
                    mv.undo(state);
                    self.bad_moves.insert(mv.identity());
                    if mv.name == "ReduceGlobal" {
                        self.reduce_global_failed = true;
                    }
                }
            }
        }

        self.interaction_index += 1;
        let ctx = GeneratorContext {
            interaction_index: self.interaction_index,
            reduce_global_failed: self.reduce_global_failed,
        };
        let candidates = generate(state, cfg, &ctx);

        let chosen = self.pick_best(candidates);
        if let Some(mv) = &chosen {
            mv.apply(state);
        }
        self.last_move = chosen.clone();
        chosen
    }

    /// Partial revert: undo only the parts of `mv` touching a week that the judge reports as
    /// delayed, leaving the rest of the move in place. Only applicable while `noDelays` is
    /// small, and only kept if the remaining, partially-reverted state is still within budget.
    fn try_partial_repair(&self, mv: &Move, state: &mut State, cfg: &Config) -> bool {
        if !(1..=5).contains(&state.no_delays) {
            return false;
        }

        let delayed: Vec<&moves::Part> = mv
            .parts
            .iter()
            .filter(|part| state.machines[part.machine].delay[part.week] > 0)
            .collect();
        if delayed.is_empty() {
            return false;
        }

        for part in &delayed {
            part.undo(state);
        }
        if state.remaining_changes(cfg.max_changes) >= 0 {
            true
        } else {
            for part in &delayed {
                part.apply(state);
            }
            false
        }
    }

    fn pick_best(&self, candidates: Vec<Move>) -> Option<Move> {
        candidates
            .into_iter()
            .filter(|mv| mv.delta > 0.0 && !self.bad_moves.contains(&mv.identity()))
            .enumerate()
            .max_by(|(ia, a), (ib, b)| {
                // on a delta tie, the earlier-generated candidate wins: reversing the index
                // comparison makes the lower index compare as the greater element.
                a.delta
                    .partial_cmp(&b.delta)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(ib.cmp(ia))
            })
            .map(|(_, mv)| mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::Machine;

    fn linear_costs() -> [f64; 9] {
        [100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0, 800.0, 900.0]
    }

    fn cfg(weeks: usize, machines: usize, max_changes: u32, interactions: u32) -> Config {
        Config {
            weeks,
            machines,
            max_changes,
            interactions,
        }
    }

    fn low_load_machine(weeks: usize) -> Machine {
        let mut m = Machine::new(weeks, linear_costs(), linear_costs());
        m.load = vec![0.1; weeks];
        m
    }

    #[test]
    fn first_step_applies_a_move() {
        let mut state = State::new(vec![low_load_machine(4)]);
        let cfg = cfg(4, 1, 20, 5);
        let mut controller = Controller::new(false);

        let mv = controller.step(&mut state, &cfg);
        assert!(mv.is_some());
    }

    #[test]
    fn score_regression_is_reverted_and_blacklisted() {
        let mut state = State::new(vec![low_load_machine(4)]);
        let cfg = cfg(4, 1, 20, 5);
        let mut controller = Controller::new(false);

        let first = controller.step(&mut state, &cfg).unwrap();
        let pattern_after_first = state.machines[0].pattern(model::Side::WeekDay).to_vec();

        // judge reports delays: a regression regardless of score.
        state.no_delays = 1;
        controller.step(&mut state, &cfg);

        assert_ne!(
            state.machines[0].pattern(model::Side::WeekDay),
            pattern_after_first.as_slice()
        );
        assert!(controller.bad_moves.contains(&first.identity()));
    }

    #[test]
    fn reduce_global_failure_sets_sticky_flag() {
        // with two machines the fleet-wide ReduceGlobal compound's delta is the sum of both
        // machines' individual deltas, strictly larger than any single-machine candidate, so
        // it is guaranteed to be the first move picked.
        let mut state = State::new(vec![low_load_machine(4), low_load_machine(4)]);
        let cfg = cfg(4, 2, 20, 5);
        let mut controller = Controller::new(false);

        let mv = controller.step(&mut state, &cfg).expect("a move is available");
        assert_eq!(mv.name, "ReduceGlobal");

        state.no_delays = 1;
        controller.step(&mut state, &cfg);
        assert!(controller.reduce_global_failed());
    }

    #[test]
    fn partial_repair_keeps_undelayed_parts_applied() {
        let mut state = State::new(vec![low_load_machine(4), low_load_machine(4)]);
        let cfg = cfg(4, 2, 20, 5);
        let mut controller = Controller::new(true);

        let first = controller
            .step(&mut state, &cfg)
            .expect("fleet-wide ReduceGlobal is available");
        assert_eq!(first.name, "ReduceGlobal");

        // localize delay to machine 0, week 1 only.
        state.machines[0].delay[1] = 3;
        state.no_delays = 1;
        controller.step(&mut state, &cfg);

        let touched_part = first
            .parts
            .iter()
            .find(|p| p.machine == 0 && p.week == 1 && p.side == model::Side::WeekDay)
            .unwrap();
        assert_eq!(
            state.machines[0].pattern(model::Side::WeekDay)[1],
            touched_part.from
        );

        let untouched_part = first
            .parts
            .iter()
            .find(|p| p.machine == 1 && p.week == 1 && p.side == model::Side::WeekDay)
            .unwrap();
        assert_eq!(
            state.machines[1].pattern(model::Side::WeekDay)[1],
            untouched_part.to
        );
        assert!(!controller.bad_moves.contains(&first.identity()));
    }
}
