// src/reader/mod.rs
mod clock;
mod cursor;
mod stream;

pub use clock::{Clock, SystemClock};
pub use cursor::ChannelCursor;
pub use stream::StreamReader;
