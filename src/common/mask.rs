use std::ops::Deref;

use super::metadata::Color;
use crate::builder::QR;

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> Self {
        assert!(pattern < 8, "Invalid masking pattern");
        Self(pattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// cf. Table 20 in JIS X 0510:2004 p. 42; arguments are (row, column)
mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match self.0 {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!(),
        }
    }
}

// Best mask search
//------------------------------------------------------------------------------

/// Scores all eight masks and applies the winner. Each trial carries its own
/// format info so the scored matrix is exactly what a reader would see. Ties
/// go to the lowest pattern number since the scan keeps the first minimum.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let best_mask = (0..8)
        .min_by_key(|m| {
            let mut trial = qr.clone();
            trial.apply_mask(MaskPattern(*m));
            penalty_score(&trial)
        })
        .expect("Should return atleast 1 mask");
    let best_mask = MaskPattern(best_mask);
    qr.apply_mask(best_mask);
    best_mask
}

// Penalty scoring (cf. JIS X 0510:2004 sec 8.8.2)
//------------------------------------------------------------------------------

// N1 + (k - 5) points per run of k >= 5 same-colored modules in a line
const PENALTY_CONSECUTIVE: u32 = 3;

// N2 points per 2x2 block of same-colored modules, overlapping blocks count
const PENALTY_BLOCK: u32 = 3;

// N3 points per 1:1:3:1:1 run sequence flanked by a light run of 4+ units
const PENALTY_FINDER_LIKE: u32 = 40;

// N4 * k points for every 5% step of deviation from 50% dark density
const PENALTY_DENSITY: u32 = 10;

pub fn penalty_score(qr: &QR) -> u32 {
    let w = qr.width() as i16;
    let mut score = 0;
    for i in 0..w {
        score += score_runs(&line_runs(qr, i, true));
        score += score_runs(&line_runs(qr, i, false));
    }
    score + block_penalty(qr) + density_penalty(qr)
}

// Run lengths along row (or column) `i`, alternating colors. The leading 0
// pins the parity: even entries are light runs, odd entries dark runs.
fn line_runs(qr: &QR, i: i16, horizontal: bool) -> Vec<u32> {
    let w = qr.width() as i16;
    let dark = |j: i16| {
        let (r, c) = if horizontal { (i, j) } else { (j, i) };
        *qr.get(r, c) == Color::Dark
    };

    let mut runs = vec![0];
    let mut j = 0;
    while j < w {
        let mut k = 0;
        while j < w && dark(j) {
            k += 1;
            j += 1;
        }
        runs.push(k);
        let mut k = 0;
        while j < w && !dark(j) {
            k += 1;
            j += 1;
        }
        runs.push(k);
    }
    runs
}

fn score_runs(runs: &[u32]) -> u32 {
    let mut score = 0;
    for &k in runs {
        if k >= 5 {
            score += PENALTY_CONSECUTIVE + (k - 5);
        }
    }
    // p:p:3p:p:p dark-light sequence bounded by a light run of >= 4p on
    // either side, multiples of the finder ratio included
    for i in (5..runs.len()).step_by(2) {
        let p = runs[i];
        if p > 0
            && runs[i - 1] == p
            && runs[i - 2] == 3 * p
            && runs[i - 3] == p
            && runs[i - 4] == p
            && (runs[i - 5] >= 4 * p || runs.get(i + 1).is_some_and(|&k| k >= 4 * p))
        {
            score += PENALTY_FINDER_LIKE;
        }
    }
    score
}

fn block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += PENALTY_BLOCK;
            }
        }
    }
    pen
}

fn density_penalty(qr: &QR) -> u32 {
    let dark = qr.count_dark_modules();
    let total = qr.width() * qr.width();
    // floor(|dark/total - 1/2| / (1/20)) without leaving integers
    let steps = (20 * dark).abs_diff(10 * total) / total;
    PENALTY_DENSITY * steps as u32
}

#[cfg(test)]
mod penalty_tests {
    use super::score_runs;

    #[test]
    fn test_consecutive_runs() {
        assert_eq!(score_runs(&[0, 4, 0]), 0);
        assert_eq!(score_runs(&[0, 5, 0]), 3);
        assert_eq!(score_runs(&[0, 6, 0]), 4);
        assert_eq!(score_runs(&[0, 5, 2, 7, 0]), 3 + 5);
    }

    #[test]
    fn test_finder_like_runs() {
        // dark 1, light 1, dark 3, light 1, dark 1, then 4 light
        assert_eq!(score_runs(&[0, 1, 1, 3, 1, 1, 4]), 40);
        // quiet zone ahead of the sequence instead
        assert_eq!(score_runs(&[4, 1, 1, 3, 1, 1, 0]), 40);
        // doubled ratio counts too; the long runs also score on their own
        assert_eq!(score_runs(&[8, 2, 2, 6, 2, 2, 0]), 40 + 6 + 4);
        // no quiet zone on either side
        assert_eq!(score_runs(&[0, 1, 1, 3, 1, 1, 1]), 0);
        // broken ratio
        assert_eq!(score_runs(&[4, 1, 2, 3, 1, 1, 4]), 0);
    }
}

#[cfg(test)]
mod mask_tests {
    use test_case::test_case;

    use super::{penalty_score, MaskPattern};
    use crate::builder::QRBuilder;
    use crate::common::metadata::ECLevel;

    #[test]
    #[should_panic]
    fn test_invalid_mask_pattern() {
        MaskPattern::new(8);
    }

    #[test_case(0)]
    #[test_case(3)]
    #[test_case(7)]
    fn test_masking_is_involutive(pattern: u8) {
        let mut qr = QRBuilder::new(b"MASKS ARE INVOLUTIVE")
            .ec_level(ECLevel::M)
            .build()
            .unwrap();
        let before = qr.clone();
        let mask = MaskPattern::new(pattern);
        qr.toggle_mask(mask);
        qr.toggle_mask(mask);
        assert_eq!(qr.to_debug_str(), before.to_debug_str());
    }

    #[test]
    fn test_best_mask_is_minimal() {
        let qr = QRBuilder::new(b"https://example.com/?q=penalty")
            .ec_level(ECLevel::L)
            .build()
            .unwrap();
        let chosen = qr.mask().expect("build applies a mask");
        let chosen_score = penalty_score(&qr);

        for m in 0..8 {
            let mut trial = qr.clone();
            // undo the winning mask, then dress the trial up as mask m
            trial.toggle_mask(chosen);
            trial.apply_mask(MaskPattern::new(m));
            let score = penalty_score(&trial);
            assert!(chosen_score <= score, "mask {m} scores {score} < {chosen_score}");
            if score == chosen_score {
                assert!(*chosen <= m, "tie must keep the lowest pattern");
            }
        }
    }
}
