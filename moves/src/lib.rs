pub mod mv;
pub mod part;

pub use mv::Move;
pub use part::Part;
