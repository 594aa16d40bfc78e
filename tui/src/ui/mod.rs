mod draw;
mod layout;
pub mod screens;
mod theme;
mod widgets;
