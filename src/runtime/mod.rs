pub mod anchor;
pub mod focus;
pub mod scheduler;
