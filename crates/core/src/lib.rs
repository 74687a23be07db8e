//! Domain logic for the project list: shared types, the tri-state field
//! patch, and the validation engine. No database or HTTP dependencies.

pub mod error;
pub mod patch;
pub mod project;
pub mod types;
