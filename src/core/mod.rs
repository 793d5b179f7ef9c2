pub mod audio;
pub mod engine;
pub mod game;
pub mod menu;
pub mod terminal;
