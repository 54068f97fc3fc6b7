use crc::{Crc, CRC_16_XMODEM};

/// CRC16-CCITT with zero initial value, no reflection and no final XOR.
const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

pub fn compute_checksum(data: &[u8]) -> u16 {
    CRC16.checksum(data)
}

/// Checksums discontiguous regions as if they were one, without copying them
/// together first.
pub fn compute_checksum_of(parts: &[&[u8]]) -> u16 {
    let mut digest = CRC16.digest();
    for part in parts {
        digest.update(part);
    }
    digest.finalize()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_checksum() {
        assert_eq!(compute_checksum(&[]), 0x0000);
    }

    #[test]
    fn check_value() {
        let checksum = compute_checksum(b"123456789");
        assert_eq!(
            checksum, 0x31C3,
            "Unexpected CRC-16/XMODEM check value, got {:04X?}",
            checksum
        );
    }

    #[test]
    fn single_byte() {
        assert_eq!(compute_checksum(&[0x01]), 0x1021);
        assert_eq!(compute_checksum(b"A"), 0x58E5);
    }

    #[test]
    fn deterministic() {
        let data = b"HELLO \x10\x17 WORLD";
        assert_eq!(compute_checksum(data), compute_checksum(data));
    }

    #[test]
    fn checksum_in_pieces() {
        let data = b"123456789";
        let (head, tail) = data.split_at(4);
        assert_eq!(compute_checksum_of(&[head, tail]), compute_checksum(data));
        assert_eq!(compute_checksum_of(&[]), compute_checksum(&[]));
    }

    #[test]
    fn every_single_bit_flip_changes_checksum() {
        let data: Vec<u8> = (0..=0xFF).collect();
        let original = compute_checksum(&data);
        let mut flipped = data.clone();
        for idx in 0..flipped.len() {
            for bit in 0..8 {
                flipped[idx] ^= 1 << bit;
                assert_ne!(
                    compute_checksum(&flipped),
                    original,
                    "Flipping bit {} of byte {} went unnoticed",
                    bit,
                    idx
                );
                flipped[idx] ^= 1 << bit;
            }
        }
    }
}
