pub mod client;
pub mod resolver;
pub mod runner;

pub use client::*;
pub use resolver::*;
pub use runner::*;
