pub mod commands;
pub mod config;
pub mod drag;
pub mod editor;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod router;
pub mod shortcuts;
pub mod snap;
pub mod tools;

pub use config::EditorConfig;
pub use editor::{Editor, InputReport};
pub use error::{ConfigError, InputError};
pub use input::{Drag, Event, MouseButton};
pub use tools::ToolKind;
