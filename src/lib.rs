#![warn(clippy::pedantic, clippy::nursery)]
pub mod core;
pub mod logging;
pub mod view;

#[cfg(test)]
pub mod tests;
