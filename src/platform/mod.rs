//! Platform abstraction layer
//!
//! Browser/native seams the simulation never sees directly:
//! - Frame throttling against wall-clock time
//! - Input aggregation (keys, virtual joystick, pointer hit-testing)

pub mod input;
pub mod time;

pub use input::{InputAggregator, Key};
pub use time::FrameThrottle;
