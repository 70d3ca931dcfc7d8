pub mod component;
pub mod cursor;
pub mod input;
pub mod input_event;
pub mod keybindings;
pub mod text;
