// Library API shared by the CLI and the integration tests
pub mod assignment;
pub mod errors;
pub mod expander;
pub mod feasibility;
pub mod log;
pub mod model;
pub mod parser;
pub mod pruner;
pub mod report;
pub mod solver;
mod symbol_char;

pub use symbol_char::NUM_SYMBOL_SLOTS;
