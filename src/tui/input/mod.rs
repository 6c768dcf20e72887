//! Keyboard-driven input widgets.

pub mod text_input;

pub use text_input::TextInput;
