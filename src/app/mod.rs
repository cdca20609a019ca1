// Application layer: the interactive front end and first-run bootstrapping.

pub mod console;
pub mod seed;

pub use console::{Console, MenuChoice};
