pub mod convert;
pub mod enrich;

pub use convert::run_convert;
pub use enrich::run_enrich;
