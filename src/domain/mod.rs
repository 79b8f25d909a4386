// ==========================================
// Domain layer - entities and types
// ==========================================

pub mod hierarchy;

pub use hierarchy::{Group, SubComponent, Unit};
