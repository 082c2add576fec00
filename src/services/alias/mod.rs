pub mod matcher;

pub use matcher::{match_alias, AliasCommand};
