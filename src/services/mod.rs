pub mod alias;
pub mod mute;
pub mod reply;
pub mod storage;
