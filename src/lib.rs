pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod interfaces;
pub mod media;
pub mod processing {
    pub mod layout;
    pub mod orientation;
}
pub mod scan;
pub mod tasks {
    pub mod clock;
    pub mod display;
    pub mod host;
    pub mod input;
    pub mod player;
    pub mod shell;
}
