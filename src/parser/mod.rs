pub mod expansion;
pub mod input;

// Re-export the public API so call sites can stay short.
pub use expansion::{parse_expansion, Expansion};
pub use input::{parse_model, InputSource};
