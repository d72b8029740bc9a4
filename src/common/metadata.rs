use std::ops::Not;

use super::codec::Mode;
use super::error::{QRError, QRResult};

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

// Error correction level
//------------------------------------------------------------------------------

/// Error correction strength. The discriminants are the 2-bit codes carried
/// in the format information and double as indices into the per-version
/// tables, so L/M/Q/H map to 1/0/3/2 rather than declaration order.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ECLevel {
    L = 1,
    M = 0,
    Q = 3,
    H = 2,
}

// Version
//------------------------------------------------------------------------------

/// QR symbol version, 1 (21x21 modules) through 40 (177x177 modules).
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct Version(u8);

impl Version {
    pub const fn new(v: u8) -> Self {
        assert!(1 <= v && v <= 40, "version out of range");
        Self(v)
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    pub const fn width(self) -> usize {
        self.0 as usize * 4 + 17
    }

    const fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        VERSIONS[self.index()].ecc_per_block[ecl as usize]
    }

    pub fn block_count(self, ecl: ECLevel) -> usize {
        VERSIONS[self.index()].block_count[ecl as usize]
    }

    /// Center coordinates of the alignment pattern grid, empty for version 1.
    pub fn alignment_centers(self) -> &'static [i16] {
        VERSIONS[self.index()].aligns
    }

    /// Number of modules available for code words and remainder bits, i.e.
    /// everything not covered by function patterns or format/version info.
    pub fn total_bits(self) -> usize {
        let v = self.0 as usize;
        let mut bits = 16 * v * v + 128 * v + 64;
        if v > 6 {
            bits -= 36;
        }
        let m = self.alignment_centers().len();
        if m > 0 {
            bits -= 25 * m * m - 10 * m - 55;
        }
        bits
    }

    pub fn total_codewords(self) -> usize {
        self.total_bits() >> 3
    }

    /// Bits left over once the region is cut into 8-bit code words.
    pub fn remainder_bits(self) -> usize {
        self.total_bits() & 7
    }

    /// Bit capacity of the data portion: code words minus ECC, including the
    /// mode indicator and character count field.
    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        (self.total_bits() & !7) - 8 * self.ecc_per_block(ecl) * self.block_count(ecl)
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.data_bit_capacity(ecl) >> 3
    }

    /// Bit width of the character count field (cf. Table 3, JIS X 0510:2004).
    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        let tier = match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match mode {
            Mode::Numeric => [10, 12, 14][tier],
            Mode::Alphanumeric => [9, 11, 13][tier],
            Mode::Byte => [8, 16, 16][tier],
        }
    }

    pub const fn mode_bits(self) -> usize {
        4
    }

    /// Maximum number of characters (bytes for byte mode) that fit at this
    /// version, mode and error correction level.
    pub fn max_data_len(self, mode: Mode, ecl: ECLevel) -> usize {
        let bits = self.data_bit_capacity(ecl) - self.mode_bits() - self.char_cnt_bits(mode);
        match mode {
            Mode::Numeric => {
                (bits / 10) * 3
                    + match bits % 10 {
                        0..=3 => 0,
                        4..=6 => 1,
                        _ => 2,
                    }
            }
            Mode::Alphanumeric => (bits / 11) * 2 + if bits % 11 < 6 { 0 } else { 1 },
            Mode::Byte => bits / 8,
        }
    }

    /// Smallest version whose capacity fits `len` characters of `mode`.
    pub fn fitting(len: usize, mode: Mode, ecl: ECLevel) -> QRResult<Version> {
        (1..=40)
            .map(Version::new)
            .find(|v| len <= v.max_data_len(mode, ecl))
            .ok_or(QRError::DataTooLong)
    }

    /// BCH(18,6)-protected version information, only defined for versions 7+.
    pub fn info(self) -> u32 {
        debug_assert!(self.0 > 6, "no version info below version 7");
        bch(self.0 as u32, 6, 0x1f25, 12)
    }
}

// BCH codes for format & version info
//------------------------------------------------------------------------------

/// Appends the BCH remainder of `data` (a `data_bits`-wide polynomial over
/// GF(2)) to its low end: shifts left by `ecc_bits`, reduces by `gen_poly`
/// (which, unlike the Reed-Solomon generators, includes its leading 1 bit)
/// and ORs the remainder back in.
pub fn bch(data: u32, data_bits: u32, gen_poly: u32, ecc_bits: u32) -> u32 {
    let mut modulus = data << ecc_bits;
    for i in (0..data_bits).rev() {
        if (modulus >> (ecc_bits + i)) & 1 == 1 {
            modulus ^= gen_poly << i;
        }
    }
    (data << ecc_bits) | modulus
}

/// 15-bit format information: ECC level and mask pattern, BCH(15,5)-protected
/// and XORed with the fixed mask 0x5412.
pub fn format_info(ecl: ECLevel, mask: u8) -> u32 {
    debug_assert!(mask < 8, "invalid mask pattern");
    bch(((ecl as u32) << 3) | mask as u32, 5, 0x537, 10) ^ 0x5412
}

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const VERSION_INFO_BIT_LEN: usize = 18;

// Coordinates are (row, column) pairs in most-significant-bit-first order;
// negative values wrap around the far edge, so one list serves every version.

pub const FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

pub const FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

pub const VERSION_INFO_COORDS_BL: [(i16, i16); 18] = [
    (-9, 5),
    (-10, 5),
    (-11, 5),
    (-9, 4),
    (-10, 4),
    (-11, 4),
    (-9, 3),
    (-10, 3),
    (-11, 3),
    (-9, 2),
    (-10, 2),
    (-11, 2),
    (-9, 1),
    (-10, 1),
    (-11, 1),
    (-9, 0),
    (-10, 0),
    (-11, 0),
];

pub const VERSION_INFO_COORDS_TR: [(i16, i16); 18] = [
    (5, -9),
    (5, -10),
    (5, -11),
    (4, -9),
    (4, -10),
    (4, -11),
    (3, -9),
    (3, -10),
    (3, -11),
    (2, -9),
    (2, -10),
    (2, -11),
    (1, -9),
    (1, -10),
    (1, -11),
    (0, -9),
    (0, -10),
    (0, -11),
];

// Per-version tables
//------------------------------------------------------------------------------

struct VersionInfo {
    // Degree of the Reed-Solomon generator polynomial, indexed by ECLevel code
    ecc_per_block: [usize; 4],
    // Number of data/ECC blocks, indexed by ECLevel code
    block_count: [usize; 4],
    // Alignment pattern center coordinates
    aligns: &'static [i16],
}

const fn row(
    ecc_per_block: [usize; 4],
    block_count: [usize; 4],
    aligns: &'static [i16],
) -> VersionInfo {
    VersionInfo { ecc_per_block, block_count, aligns }
}

// cf. JIS X 0510:2004 pp. 30--36, 71. The ECC column order follows the
// numeric level codes (M, L, H, Q). Generator degrees are the per-block
// values after the near-equal block split, so a handful differ from the
// headline figures in the standard's tables.
const THIRTIES: [usize; 4] = [28, 30, 30, 30];

#[rustfmt::skip]
static VERSIONS: [VersionInfo; 40] = [
    row([10, 7, 17, 13], [1, 1, 1, 1], &[]),
    row([16, 10, 28, 22], [1, 1, 1, 1], &[6, 18]),
    row([26, 15, 22, 18], [1, 1, 2, 2], &[6, 22]),
    row([18, 20, 16, 26], [2, 1, 4, 2], &[6, 26]),
    row([24, 26, 22, 18], [2, 1, 4, 4], &[6, 30]),
    row([16, 18, 28, 24], [4, 2, 4, 4], &[6, 34]),
    row([18, 20, 26, 18], [4, 2, 5, 6], &[6, 22, 38]),
    row([22, 24, 26, 22], [4, 2, 6, 6], &[6, 24, 42]),
    row([22, 30, 24, 20], [5, 2, 8, 8], &[6, 26, 46]),
    row([26, 18, 28, 24], [5, 4, 8, 8], &[6, 28, 50]),
    row([30, 20, 24, 28], [5, 4, 11, 8], &[6, 30, 54]),
    row([22, 24, 28, 26], [8, 4, 11, 10], &[6, 32, 58]),
    row([22, 26, 22, 24], [9, 4, 16, 12], &[6, 34, 62]),
    row([24, 30, 24, 20], [9, 4, 16, 16], &[6, 26, 46, 66]),
    row([24, 22, 24, 30], [10, 6, 18, 12], &[6, 26, 48, 70]),
    row([28, 24, 30, 24], [10, 6, 16, 17], &[6, 26, 50, 74]),
    row([28, 28, 28, 28], [11, 6, 19, 16], &[6, 30, 54, 78]),
    row([26, 30, 28, 28], [13, 6, 21, 18], &[6, 30, 56, 82]),
    row([26, 28, 26, 26], [14, 7, 25, 21], &[6, 30, 58, 86]),
    row([26, 28, 28, 30], [16, 8, 25, 20], &[6, 34, 62, 90]),
    row([26, 28, 30, 28], [17, 8, 25, 23], &[6, 28, 50, 72, 94]),
    row([28, 28, 24, 30], [17, 9, 34, 23], &[6, 26, 50, 74, 98]),
    row(THIRTIES, [18, 9, 30, 25], &[6, 30, 54, 78, 102]),
    row(THIRTIES, [20, 10, 32, 27], &[6, 28, 54, 80, 106]),
    row([28, 26, 30, 30], [21, 12, 35, 29], &[6, 32, 58, 84, 110]),
    row([28, 28, 30, 28], [23, 12, 37, 34], &[6, 30, 58, 86, 114]),
    row(THIRTIES, [25, 12, 40, 34], &[6, 34, 62, 90, 118]),
    row(THIRTIES, [26, 13, 42, 35], &[6, 26, 50, 74, 98, 122]),
    row(THIRTIES, [28, 14, 45, 38], &[6, 30, 54, 78, 102, 126]),
    row(THIRTIES, [29, 15, 48, 40], &[6, 26, 52, 78, 104, 130]),
    row(THIRTIES, [31, 16, 51, 43], &[6, 30, 56, 82, 108, 134]),
    row(THIRTIES, [33, 17, 54, 45], &[6, 34, 60, 86, 112, 138]),
    row(THIRTIES, [35, 18, 57, 48], &[6, 30, 58, 86, 114, 142]),
    row(THIRTIES, [37, 19, 60, 51], &[6, 34, 62, 90, 118, 146]),
    row(THIRTIES, [38, 19, 63, 53], &[6, 30, 54, 78, 102, 126, 150]),
    row(THIRTIES, [40, 20, 66, 56], &[6, 24, 50, 76, 102, 128, 154]),
    row(THIRTIES, [43, 21, 70, 59], &[6, 28, 54, 80, 106, 132, 158]),
    row(THIRTIES, [45, 22, 74, 62], &[6, 32, 58, 84, 110, 136, 162]),
    row(THIRTIES, [47, 24, 77, 65], &[6, 26, 54, 82, 110, 138, 166]),
    row(THIRTIES, [49, 25, 81, 68], &[6, 30, 58, 86, 114, 142, 170]),
];
