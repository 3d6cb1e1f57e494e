pub mod artifacts;
pub mod not_found;
pub mod relationships;
