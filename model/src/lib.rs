pub mod config;
pub mod machine;
pub mod pattern;
pub mod side;
pub mod state;

pub use config::Config;
pub use machine::Machine;
pub use pattern::PatternCode;
pub use side::Side;
pub use state::State;
