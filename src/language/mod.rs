// Types representing solution documents and grading schemas

mod error;
mod types;

// Re-export all public symbols
pub use error::*;
pub use types::*;
