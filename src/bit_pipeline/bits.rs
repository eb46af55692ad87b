//! Bit stream module
//!
//! This module turns raw bytes into an indexable bit stream.

mod source;
mod byte_source;
pub mod stream;

pub use source::BitSource;
pub use byte_source::ByteBitSource;
pub use stream::BitStream;
