use std::io::{BufRead, Write};

use model::{Config, Machine, Side, State};

use crate::error::SolverError;
use crate::words::Words;

/// Reads the one-time initialization header: `W M maxChanges N`, then `M` machines' nine
/// `(weekDayUnitCost, weekEndUnitCost)` pairs in ascending pattern-code order.
pub fn read_header<R: BufRead>(words: &mut Words<R>) -> Result<(Config, Vec<Machine>), SolverError> {
    let weeks = words.next_usize()?;
    let machine_count = words.next_usize()?;
    let max_changes = words.next_u32()?;
    let interactions = words.next_u32()?;

    let mut machines = Vec::with_capacity(machine_count);
    for _ in 0..machine_count {
        let mut week_day_cost = [0.0; 9];
        let mut week_end_cost = [0.0; 9];
        for code in 0..9 {
            week_day_cost[code] = words.next_f64()?;
            week_end_cost[code] = words.next_f64()?;
        }
        machines.push(Machine::new(weeks, week_day_cost, week_end_cost));
    }

    let config = Config {
        weeks,
        machines: machine_count,
        max_changes,
        interactions,
    };
    Ok((config, machines))
}

/// Reads one feedback block: `score noViolations noDelays`, then `M` blocks of `W` `load
/// delay` lines, overwriting each machine's load/delay arrays whole.
pub fn read_feedback<R: BufRead>(
    words: &mut Words<R>,
    state: &mut State,
    cfg: &Config,
) -> Result<(), SolverError> {
    state.score = words.next_u64()?;
    state.no_violations = words.next_u64()?;
    state.no_delays = words.next_u64()?;

    for m in 0..cfg.machines {
        let mut load = Vec::with_capacity(cfg.weeks);
        let mut delay = Vec::with_capacity(cfg.weeks);
        for _ in 0..cfg.weeks {
            load.push(words.next_f64()?);
            delay.push(words.next_u32()?);
        }
        state.machines[m].set_feedback(load, delay);
    }
    Ok(())
}

/// Writes the outgoing pattern grid: `M` lines of `2*W` digit characters, `2w` the weekday
/// code and `2w+1` the weekend code.
pub fn write_grid<W: Write>(writer: &mut W, state: &State) -> Result<(), SolverError> {
    for machine in &state.machines {
        let mut line = String::with_capacity(machine.weeks() * 2);
        for week in 0..machine.weeks() {
            line.push(digit(machine.pattern(Side::WeekDay)[week].value()));
            line.push(digit(machine.pattern(Side::WeekEnd)[week].value()));
        }
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}

fn digit(code: u8) -> char {
    (b'0' + code) as char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_header_builds_config_and_machines() {
        let input = "2 1 20 3\n\
                      10 1 20 2 30 3 40 4 50 5 60 6 70 7 80 8 90 9\n";
        let mut words = Words::new(Cursor::new(input));
        let (cfg, machines) = read_header(&mut words).unwrap();

        assert_eq!(cfg.weeks, 2);
        assert_eq!(cfg.machines, 1);
        assert_eq!(cfg.max_changes, 20);
        assert_eq!(cfg.interactions, 3);
        assert_eq!(machines.len(), 1);
        assert_eq!(machines[0].unit_cost(Side::WeekDay)[0], 10.0);
        assert_eq!(machines[0].unit_cost(Side::WeekEnd)[8], 9.0);
    }

    #[test]
    fn write_grid_emits_fixed_width_digit_lines() {
        let machine = Machine::new(3, [0.0; 9], [0.0; 9]);
        let state = State::new(vec![machine]);
        let mut out = Vec::new();
        write_grid(&mut out, &state).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "999999\n");
    }

    #[test]
    fn read_feedback_overwrites_load_and_delay() {
        let machine = Machine::new(2, [0.0; 9], [0.0; 9]);
        let mut state = State::new(vec![machine]);
        let cfg = Config {
            weeks: 2,
            machines: 1,
            max_changes: 20,
            interactions: 3,
        };
        let mut words = Words::new(Cursor::new("100 0 0\n0.5 1\n0.25 0\n"));
        read_feedback(&mut words, &mut state, &cfg).unwrap();

        assert_eq!(state.score, 100);
        assert_eq!(state.machines[0].load, vec![0.5, 0.25]);
        assert_eq!(state.machines[0].delay, vec![1, 0]);
    }
}
