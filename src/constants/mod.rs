pub mod defaults;
pub mod messages;
