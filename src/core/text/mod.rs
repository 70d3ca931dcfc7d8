//! Width-aware text helpers shared by the widgets.

pub mod utils;
pub mod width;
