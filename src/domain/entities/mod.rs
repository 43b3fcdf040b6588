//! Domain Entities
//!
//! - `SettingsModel` - the validated plugin configuration

mod settings;

pub use settings::SettingsModel;
