pub mod plugin;
pub mod settings;

pub use plugin::PluginConfig;
pub use settings::Settings;
