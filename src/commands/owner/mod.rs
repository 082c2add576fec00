pub mod mute;
