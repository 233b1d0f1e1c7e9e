//! CRC-8/SMBUS protection for [`WireFormat::Checked`](crate::WireFormat::Checked) packets.
//!
//! The checksum covers every byte after the start sentinel up to, but not
//! including, the CRC byte itself.

use crc::{Crc, CRC_8_SMBUS};

const CRC8: Crc<u8> = Crc::<u8>::new(&CRC_8_SMBUS);

/// CRC-8/SMBUS of a byte slice.
#[inline]
#[must_use]
pub fn calculate_crc8(data: &[u8]) -> u8 {
    CRC8.checksum(data)
}

/// Running CRC-8 over bytes as they are written to a packet.
pub struct Crc8Digest {
    digest: crc::Digest<'static, u8>,
}

impl Crc8Digest {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            digest: CRC8.digest(),
        }
    }

    #[inline]
    pub fn update(&mut self, byte: u8) {
        self.digest.update(&[byte]);
    }

    #[inline]
    #[must_use]
    pub fn finalize(self) -> u8 {
        self.digest.finalize()
    }
}

impl Default for Crc8Digest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_value() {
        // Catalogue check value for CRC-8/SMBUS.
        assert_eq!(calculate_crc8(b"123456789"), 0xF4);
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(calculate_crc8(&[]), 0x00);
    }

    #[test]
    fn test_digest_matches_batch() {
        let payload = [0x01, 0x13, 0x01, 0x02, 0x7F, 0xFF, 0x03, 0x05];
        let mut digest = Crc8Digest::new();
        for &b in &payload {
            digest.update(b);
        }
        assert_eq!(digest.finalize(), calculate_crc8(&payload));
    }

    #[test]
    fn test_single_bit_flip_detected() {
        let payload = [0x02, 0x13, 0x14, 0x00];
        let mut corrupted = payload;
        corrupted[1] ^= 0x01;
        assert_ne!(calculate_crc8(&payload), calculate_crc8(&corrupted));
    }
}
