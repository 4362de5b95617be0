pub mod annotation;
pub mod braces;

pub use annotation::*;
pub use braces::*;
