pub mod drawer;
pub mod terminal;
pub mod window;
