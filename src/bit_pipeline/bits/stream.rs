//! Packed, read-only bit stream

/// The content of a file viewed as an ordered sequence of single bits.
///
/// Bit `i` lives in byte `i / 8` at position `i % 8`, least-significant bit
/// first. The stream is immutable once built, so it can be shared by
/// reference across every rasterization worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStream {
    /// Packed bits, LSB-first within each byte
    bytes: Vec<u8>,
    /// Number of valid bits (may stop partway through the last byte)
    len: usize,
}

impl BitStream {
    /// Wraps a byte buffer; the stream holds exactly `8 * bytes.len()` bits.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let len = bytes.len() * 8;
        Self { bytes, len }
    }

    /// Packs an iterator of bit values (`0` or non-zero) into a stream.
    pub fn from_bits<I: IntoIterator<Item = u8>>(bits: I) -> Self {
        let mut bytes = Vec::new();
        let mut len = 0usize;
        for bit in bits {
            if len % 8 == 0 {
                bytes.push(0);
            }
            if bit != 0 {
                if let Some(last) = bytes.last_mut() {
                    *last |= 1 << (len % 8);
                }
            }
            len += 1;
        }
        Self { bytes, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the bit at `idx`, or `None` when `idx` is past the end.
    #[inline]
    pub fn bit_at(&self, idx: usize) -> Option<u8> {
        if idx >= self.len {
            return None;
        }
        Some((self.bytes[idx / 8] >> (idx % 8)) & 1)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = u8> + '_ {
        (0..self.len).map(move |idx| (self.bytes[idx / 8] >> (idx % 8)) & 1)
    }

    /// Number of set bits in the stream.
    pub fn count_ones(&self) -> usize {
        let full = self.len / 8;
        let mut ones: usize = self.bytes[..full]
            .iter()
            .map(|b| b.count_ones() as usize)
            .sum();
        let rest = self.len % 8;
        if rest > 0 {
            let mask = (1u8 << rest) - 1;
            ones += (self.bytes[full] & mask).count_ones() as usize;
        }
        ones
    }

    /// Share of 1-bits, in percent. An empty stream has a density of 0.
    pub fn density_percent(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        self.count_ones() as f64 / self.len as f64 * 100.0
    }

    /// Selects a relative slice of the stream, bounds given in percent.
    ///
    /// Bounds are converted with `floor(len * pct / 100)`. Equal bounds yield
    /// `None`. When `start_pct > end_pct` the bounds are swapped and the slice
    /// is taken from the reversed stream.
    pub fn window(&self, start_pct: f64, end_pct: f64) -> Option<BitStream> {
        let mut start = (self.len as f64 * start_pct / 100.0) as usize;
        let mut end = (self.len as f64 * end_pct / 100.0) as usize;
        start = start.min(self.len);
        end = end.min(self.len);

        if start == end {
            return None;
        }

        if start > end {
            std::mem::swap(&mut start, &mut end);
            return Some(Self::from_bits(self.iter().rev().skip(start).take(end - start)));
        }

        Some(Self::from_bits(self.iter().skip(start).take(end - start)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_lsb_first() {
        let stream = BitStream::from_bytes(vec![0b0000_0101, 0x80]);
        assert_eq!(stream.len(), 16);
        let bits: Vec<u8> = stream.iter().collect();
        assert_eq!(bits, vec![1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_bit_at_out_of_range() {
        let stream = BitStream::from_bytes(vec![0xFF]);
        assert_eq!(stream.bit_at(7), Some(1));
        assert_eq!(stream.bit_at(8), None);
        assert_eq!(BitStream::from_bytes(Vec::new()).bit_at(0), None);
    }

    #[test]
    fn test_from_bits_partial_byte() {
        let stream = BitStream::from_bits([1, 1, 0]);
        assert_eq!(stream.len(), 3);
        assert_eq!(stream.bit_at(1), Some(1));
        assert_eq!(stream.bit_at(2), Some(0));
        assert_eq!(stream.bit_at(3), None);
        assert_eq!(stream.count_ones(), 2);
    }

    #[test]
    fn test_density() {
        let stream = BitStream::from_bytes(vec![0x0F, 0x00]);
        assert!((stream.density_percent() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_window_forward() {
        // bits: 1111 0000 0000 0000
        let stream = BitStream::from_bytes(vec![0x0F, 0x00]);
        let window = stream.window(0.0, 25.0).unwrap();
        assert_eq!(window.len(), 4);
        assert_eq!(window.count_ones(), 4);

        let window = stream.window(25.0, 50.0).unwrap();
        assert_eq!(window.count_ones(), 0);
    }

    #[test]
    fn test_window_reversed_when_bounds_swapped() {
        // bits: 1000 0000 0000 0011
        let stream = BitStream::from_bytes(vec![0x01, 0xC0]);
        let window = stream.window(25.0, 0.0).unwrap();
        let bits: Vec<u8> = window.iter().collect();
        assert_eq!(bits, vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_window_empty() {
        let stream = BitStream::from_bytes(vec![0xAA]);
        assert!(stream.window(50.0, 50.0).is_none());
    }
}
