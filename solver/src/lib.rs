pub mod controller;
pub mod generator;

pub use controller::Controller;
pub use generator::{generate, GeneratorContext};
