// Presenting parse failures against the document they came from

mod display;

// Re-export all public symbols
pub use display::*;
