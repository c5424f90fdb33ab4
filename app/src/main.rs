use std::io::{stdin, stdout, BufReader, BufWriter};
use std::process::ExitCode;

fn main() -> ExitCode {
    let reader = BufReader::new(stdin().lock());
    let writer = BufWriter::new(stdout().lock());

    match app::run(reader, writer, true) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
