pub mod path;
mod types;

pub use types::*;
