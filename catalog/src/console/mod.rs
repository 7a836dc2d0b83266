// Console layer module
pub mod menu;
pub mod prompt;

pub use menu::{Menu, MenuAction, MenuCommand, MenuOption};
pub use prompt::{AnswerKind, ConsolePrompt, InputSource};
