use crate::bit_pipeline::bits::stream::BitStream;
use crate::bit_pipeline::common::error::Result;

pub trait BitSource {
    fn read_bits(&self, data: &[u8]) -> Result<BitStream>;
}
