//! Bit source that exposes a byte buffer verbatim.
//!
//! Every byte contributes eight bits in least-significant-bit-first order, so
//! a file of `n` bytes becomes a stream of `8 * n` bits. No knowledge of the
//! file format is involved.

use tracing::debug;
use crate::bit_pipeline::bits::source::BitSource;
use crate::bit_pipeline::bits::stream::BitStream;
use crate::bit_pipeline::common::error::Result;

pub struct ByteBitSource;

impl BitSource for ByteBitSource {
    fn read_bits(&self, data: &[u8]) -> Result<BitStream> {
        debug!("Reading bit stream from {} bytes", data.len());
        Ok(BitStream::from_bytes(data.to_vec()))
    }
}
