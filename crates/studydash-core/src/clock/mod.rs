mod poller;
mod source;

pub use poller::ClockPoller;
pub use source::{Clock, FixedClock, SystemClock};
