pub mod attractor;
pub mod colors;
pub mod constants;
pub mod error;
pub mod font;
pub mod manifest;
pub mod output;
pub mod panel;
pub mod render;
pub mod search;
