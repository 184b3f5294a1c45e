//! Adapters layer (Hexagonal Architecture)

mod memory;

pub use memory::*;
