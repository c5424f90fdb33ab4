use std::fmt;
use std::io;

/// Everything that can go wrong talking to the judge. Both variants are fatal: the caller
/// reports them and exits non-zero, there is no retry of I/O.
#[derive(Debug)]
pub enum SolverError {
    /// malformed or truncated judge input: a token that wasn't there, or didn't parse.
    Protocol(String),
    Io(io::Error),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::Protocol(msg) => write!(f, "judge protocol error: {}", msg),
            SolverError::Io(err) => write!(f, "judge I/O error: {}", err),
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::Protocol(_) => None,
            SolverError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for SolverError {
    fn from(err: io::Error) -> Self {
        SolverError::Io(err)
    }
}
