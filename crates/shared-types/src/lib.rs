pub mod error;

// Domain modules (canonical locations for all case-diary domain types)
pub mod case;
pub mod diary;

pub use error::*;

// Re-export all domain types
pub use case::*;
pub use diary::*;
