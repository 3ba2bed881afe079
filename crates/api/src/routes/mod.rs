pub mod asos;
pub mod forecast;
pub mod meta;
pub mod rda;
pub mod realtime;
pub mod stats;

pub use asos::*;
pub use forecast::*;
pub use meta::*;
pub use rda::*;
pub use realtime::*;
pub use stats::*;
