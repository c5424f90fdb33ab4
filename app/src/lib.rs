use std::io::{BufRead, Write};

use judge_io::{read_feedback, read_header, write_grid, SolverError, Words};
use model::State;
use solver::Controller;

/// Prints to stderr only when built with `--features local`; a stand-in for the repository's
/// logging side-channel, which the judge never sees.
#[macro_export]
macro_rules! diag {
    ($($arg:tt)*) => {
        #[cfg(feature = "local")]
        {
            eprintln!($($arg)*);
        }
    };
}

/// Drives the whole interaction: reads the header, emits the initial (all-9s) grid, then
/// alternates reading feedback and emitting the controller's next move until the judge's
/// announced interaction count is exhausted.
pub fn run<R: BufRead, W: Write>(reader: R, mut writer: W, repair_enabled: bool) -> Result<(), SolverError> {
    let mut words = Words::new(reader);
    let (cfg, machines) = read_header(&mut words)?;
    diag!(
        "header: weeks={} machines={} max_changes={} interactions={}",
        cfg.weeks,
        cfg.machines,
        cfg.max_changes,
        cfg.interactions
    );

    let mut state = State::new(machines);
    let mut controller = Controller::new(repair_enabled);

    write_grid(&mut writer, &state)?;

    for round in 1..=cfg.interactions {
        read_feedback(&mut words, &mut state, &cfg)?;
        diag!(
            "round {}: score={} no_violations={} no_delays={}",
            round,
            state.score,
            state.no_violations,
            state.no_delays
        );

        if round == cfg.interactions {
            break;
        }

        let applied = controller.step(&mut state, &cfg);
        diag!("round {}: applied move = {:?}", round, applied.map(|mv| mv.name));
        write_grid(&mut writer, &state)?;
    }

    diag!("done: best_score={}", controller.best_score());
    Ok(())
}
