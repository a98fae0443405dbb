pub mod cli;
pub mod menu;
pub mod render;
