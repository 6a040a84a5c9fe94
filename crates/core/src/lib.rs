// Core library for picking the best tracks of a media source and restreaming them

pub mod command;
pub mod config;
pub mod language;
pub mod launch;
pub mod probe;
pub mod select;
pub mod startup;

// Re-export commonly used types
pub use command::{build_command, CommandTemplate, Placeholder};
pub use config::StreamConfig;
pub use language::LanguageCode;
pub use select::{
    select_streams, AudioPick, AudioTier, MediaType, SelectionPolicy, SelectionResult,
    StreamDescriptor,
};
