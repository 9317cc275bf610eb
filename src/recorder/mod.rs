//! Buffered session recording
//!
//! The recorder captures sensor readings into per-sensor FIFO queues
//! ([`SampleBuffer`]), drains them to a timestamped CSV file owned by a
//! [`RecordingSession`], and is driven once per poll cycle by the
//! [`CaptureDriver`], which also enforces the memory-pressure flush policy.
//!
//! Everything runs on the thread that drives polling and display; there is
//! no background writer. A flush runs to completion once invoked, and
//! stopping a session completes the final flush before returning.

mod buffer;
mod capture;
pub mod preamble;
mod session;

pub use buffer::SampleBuffer;
pub use capture::{CaptureDriver, TickOutcome, DEFAULT_PRESSURE_FRACTION};
pub use session::RecordingSession;
