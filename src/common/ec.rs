use std::ops::Deref;

use super::metadata::{ECLevel, Version};

// GF(256) arithmetic tables
//------------------------------------------------------------------------------

// GF(2^8) with the reducing polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11d).
// EXP_TABLE maps exponents of the generator element to field values and
// LOG_TABLE inverts it; LOG_TABLE[0] is never consulted.

const fn exp_table() -> [u8; 255] {
    let mut table = [0u8; 255];
    let mut v: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[i] = v as u8;
        v <<= 1;
        if v >= 256 {
            v ^= 0x11d;
        }
        i += 1;
    }
    table
}

const fn log_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[EXP_TABLE[i] as usize] = i as u8;
        i += 1;
    }
    table
}

pub(crate) const EXP_TABLE: [u8; 255] = exp_table();

pub(crate) const LOG_TABLE: [u8; 256] = log_table();

// Generator polynomials
//------------------------------------------------------------------------------

pub(crate) const MAX_EC_SIZE: usize = 30;

// The degree-k generator polynomial is the product of (x - a^0) through
// (x - a^(k-1)). Coefficients are stored as exponents with the leading 1
// omitted, so row k holds k entries; generator_polynomial trims the padding.
const fn generator_polynomials() -> [[u8; MAX_EC_SIZE]; MAX_EC_SIZE + 1] {
    let mut polys = [[0u8; MAX_EC_SIZE]; MAX_EC_SIZE + 1];
    let mut deg = 0;
    while deg < MAX_EC_SIZE {
        // multiply the degree-deg polynomial by (x - a^deg)
        let mut j = 0;
        while j <= deg {
            let a = if j < deg { EXP_TABLE[polys[deg][j] as usize] } else { 0 };
            let prev = if j > 0 { polys[deg][j - 1] as usize } else { 0 };
            let b = EXP_TABLE[(deg + prev) % 255];
            polys[deg + 1][j] = LOG_TABLE[(a ^ b) as usize];
            j += 1;
        }
        deg += 1;
    }
    polys
}

const GENERATOR_POLYNOMIALS: [[u8; MAX_EC_SIZE]; MAX_EC_SIZE + 1] = generator_polynomials();

fn generator_polynomial(ecc_count: usize) -> &'static [u8] {
    debug_assert!(
        0 < ecc_count && ecc_count <= MAX_EC_SIZE,
        "No generator polynomial of degree {ecc_count}"
    );
    &GENERATOR_POLYNOMIALS[ecc_count][..ecc_count]
}

// ECC: Error Correction Codeword generator
//------------------------------------------------------------------------------

/// Computes the Reed-Solomon code words for each data block and returns the
/// blocks alongside them.
pub fn ecc(data: &[u8], ver: Version, ecl: ECLevel) -> (Vec<&[u8]>, Vec<Vec<u8>>) {
    let data_blocks = blockify(data, ver, ecl);

    let ecc_size_per_block = ver.ecc_per_block(ecl);
    let ecc_blocks =
        data_blocks.iter().map(|b| ecc_per_block(b, ecc_size_per_block)).collect::<Vec<_>>();

    (data_blocks, ecc_blocks)
}

/// Splits the data code words into near-equal blocks: with a pivot at
/// `block_count - len % block_count`, blocks before it hold `len / block_count`
/// code words and blocks after it one more.
pub fn blockify(data: &[u8], ver: Version, ecl: ECLevel) -> Vec<&[u8]> {
    let block_count = ver.block_count(ecl);
    let short_size = data.len() / block_count;
    let pivot = block_count - data.len() % block_count;

    debug_assert!(short_size > 0, "More blocks than data codewords");

    let (short_part, long_part) = data.split_at(short_size * pivot);
    let mut data_blocks = Vec::with_capacity(block_count);
    data_blocks.extend(short_part.chunks(short_size));
    if !long_part.is_empty() {
        data_blocks.extend(long_part.chunks(short_size + 1));
    }
    data_blocks
}

// Performs polynomial long division of the zero-augmented data polynomial by
// the generator polynomial; the remainder coefficients are the ecc. Same
// structure as a CRC, only over GF(256) instead of GF(2).
fn ecc_per_block(block: &[u8], ecc_count: usize) -> Vec<u8> {
    let len = block.len();
    let gen_poly = generator_polynomial(ecc_count);

    let mut res = block.to_vec();
    res.resize(len + ecc_count, 0);

    for i in 0..len {
        let lead_coeff = res[i] as usize;
        if lead_coeff == 0 {
            continue;
        }

        let log_lead_coeff = LOG_TABLE[lead_coeff] as usize;
        for (u, v) in res[i + 1..].iter_mut().zip(gen_poly.iter()) {
            let mut log_sum = *v as usize + log_lead_coeff;
            if log_sum >= 255 {
                log_sum -= 255;
            }
            *u ^= EXP_TABLE[log_sum];
        }
    }

    res.split_off(len)
}

// Interleaving
//------------------------------------------------------------------------------

/// Takes one code word from each block in turn; exhausted (shorter) blocks
/// simply drop out of the rotation.
pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().expect("Blocks is empty");
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

/// Full error correction pass: block split, per-block ecc, then the final
/// interleaved code word sequence (all data blocks, then all ecc blocks).
pub fn augment_ecc(data: &[u8], ver: Version, ecl: ECLevel) -> Vec<u8> {
    let (data_blocks, ecc_blocks) = ecc(data, ver, ecl);
    let mut payload = interleave(&data_blocks);
    payload.extend(interleave(&ecc_blocks));
    payload
}


#[cfg(test)]
mod ec_tests {
    use super::{blockify, ecc, ecc_per_block, interleave};
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_poly_mod_1() {
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", 10);
        assert_eq!(&*res, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_poly_mod_2() {
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", 13);
        assert_eq!(&*res, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_poly_mod_3() {
        let res = ecc_per_block(b"CUF\x86W&U\xc2w2\x06\x12\x06g&", 18);
        assert_eq!(&*res, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_ecc_simple() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let expected_ecc = [b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17"];
        let (_, ecc) = ecc(msg, Version::new(1), ECLevel::M);
        assert_eq!(&*ecc, expected_ecc);
    }

    #[test]
    fn test_ecc_complex() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ecc = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let (_, ecc) = ecc(msg, Version::new(5), ECLevel::Q);
        assert_eq!(&*ecc, &expected_ecc[..]);
    }

    #[test]
    fn test_blockify_even() {
        let data = (0u8..62).collect::<Vec<_>>();
        let blocks = blockify(&data, Version::new(5), ECLevel::Q);
        assert_eq!(blocks.len(), 4);
        assert!(blocks.iter().all(|b| b.len() == 15 || b.len() == 16));
        assert_eq!(blocks[0].len() + blocks[1].len() + blocks[2].len() + blocks[3].len(), 62);
        // later blocks take the extra codeword
        assert_eq!(blocks[0].len(), 15);
        assert_eq!(blocks[3].len(), 16);
    }

    #[test]
    fn test_blockify_exact() {
        let data = [0u8; 16];
        let blocks = blockify(&data, Version::new(1), ECLevel::M);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].len(), 16);
    }

    #[test]
    fn test_interleave() {
        let blocks = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9, 0]];
        let interleaved = interleave(&blocks);
        let exp_interleaved = vec![1, 4, 7, 2, 5, 8, 3, 6, 9, 0];
        assert_eq!(interleaved, exp_interleaved);
    }
}
