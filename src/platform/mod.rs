//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic milliseconds)
//! - Input events (keys and on-screen buttons)

pub mod clock;
pub mod input;

pub use clock::{Clock, ManualClock};
#[cfg(not(target_arch = "wasm32"))]
pub use clock::SystemClock;
#[cfg(target_arch = "wasm32")]
pub use clock::WebClock;
pub use input::{InputCommand, map_button, map_key};
