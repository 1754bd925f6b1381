pub mod config;
pub mod events;
pub mod persist;
pub mod script;
pub mod seekbar;
