pub mod ecef;
pub mod geodesy;
pub mod local;

pub use ecef::*;
pub use geodesy::*;
pub use local::*;
