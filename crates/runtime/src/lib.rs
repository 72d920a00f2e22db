pub mod event_bus;
pub mod frame;
pub mod timer_queue;

pub use event_bus::*;
pub use frame::*;
pub use timer_queue::*;
