pub mod plugin_storage;
