//! Renderers turning a sample into console text or JSON

pub mod console;
pub mod json;

pub use console::ConsoleRenderer;
pub use json::{print_json, to_json};
