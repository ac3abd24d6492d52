//! Utility modules for value-only mapping.

pub mod lexical;

pub use lexical::LexicalError;
