//! Repository Implementations

mod settings;

pub use settings::TomlSettingsRepository;
