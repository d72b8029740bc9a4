mod bmp;
mod qr;

pub use qr::QR;

#[cfg(test)]
pub(crate) use qr::Module;

use crate::common::{
    codec::{self, Mode},
    ec::augment_ecc,
    error::{QRError, QRResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
    BitStream,
};

// QR builder
//------------------------------------------------------------------------------

/// Configures and runs one encode. Only the data is required: the mode is
/// sniffed from its content, the version defaults to the smallest that fits
/// and the mask to the lowest-penalty pattern.
pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::L, mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    /// Pins the version instead of searching for the smallest fit.
    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    /// Forces a mask pattern, skipping the penalty search.
    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn build(&self) -> QRResult<QR> {
        let mode = Mode::sniff(self.data);

        let version = match self.version {
            Some(v) => {
                if self.data.len() > v.max_data_len(mode, self.ec_level) {
                    return Err(QRError::DataTooLong);
                }
                v
            }
            None => Version::fitting(self.data.len(), mode, self.ec_level)?,
        };

        // Pack data into code words, then append ecc and interleave
        let encoded = codec::encode(self.data, mode, version, self.ec_level);
        let codewords = augment_ecc(encoded.data(), version, self.ec_level);

        let mut payload = BitStream::new(version.total_codewords() << 3);
        payload.extend(&codewords);

        let mut qr = QR::with_base(version, self.ec_level);
        qr.draw_payload(payload);

        match self.mask {
            Some(m) => qr.apply_mask(m),
            None => {
                apply_best_mask(&mut qr);
            }
        }

        Ok(qr)
    }
}

#[cfg(test)]
mod builder_tests {
    use test_case::test_case;

    use super::{Module, QRBuilder};
    use crate::common::iter::ZigzagIter;
    use crate::common::metadata::{format_info, ECLevel, Version};
    use crate::common::{MaskPattern, QRError};

    #[test_case("1234567890", ECLevel::L, 1)]
    #[test_case("HELLO WORLD", ECLevel::M, 1)]
    #[test_case("HTTPS://EXAMPLE.COM/A/B/C?D=E", ECLevel::Q, 3)]
    #[test_case("lowercase forces byte mode", ECLevel::L, 2)]
    fn test_version_search(data: &str, ecl: ECLevel, exp_version: u8) {
        let qr = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();
        assert_eq!(qr.version(), Version::new(exp_version));
        assert_eq!(qr.width(), qr.version().width());
    }

    #[test]
    fn test_empty_data_encodes_minimal_symbol() {
        let qr = QRBuilder::new(b"").build().unwrap();
        assert_eq!(qr.version(), Version::new(1));
        assert_eq!(qr.width(), 21);
        assert!(qr.mask().is_some());
    }

    #[test]
    fn test_data_too_long() {
        let digits = "9".repeat(7090);
        let res = QRBuilder::new(digits.as_bytes()).ec_level(ECLevel::L).build();
        assert_eq!(res.unwrap_err(), QRError::DataTooLong);
    }

    #[test]
    fn test_data_too_long_for_pinned_version() {
        let res = QRBuilder::new(b"THIS DOES NOT FIT INTO VERSION ONE AT LEVEL H")
            .version(Version::new(1))
            .ec_level(ECLevel::H)
            .build();
        assert_eq!(res.unwrap_err(), QRError::DataTooLong);
    }

    #[test]
    fn test_pinned_version_and_mask() {
        let qr = QRBuilder::new(b"PINNED")
            .version(Version::new(4))
            .mask(MaskPattern::new(5))
            .build()
            .unwrap();
        assert_eq!(qr.version(), Version::new(4));
        assert_eq!(qr.mask(), Some(MaskPattern::new(5)));
    }

    // Reading the format strip back from the matrix must reproduce the
    // BCH-protected format info for the chosen mask and level.
    #[test_case(ECLevel::L)]
    #[test_case(ECLevel::M)]
    #[test_case(ECLevel::Q)]
    #[test_case(ECLevel::H)]
    fn test_format_info_roundtrip(ecl: ECLevel) {
        let qr = QRBuilder::new(b"FORMAT CHECK").ec_level(ecl).build().unwrap();
        let mask = qr.mask().unwrap();
        let exp = format_info(ecl, *mask);

        let coords = crate::common::metadata::FORMAT_INFO_COORDS_MAIN;
        let mut read = 0u32;
        for (r, c) in coords {
            read = (read << 1) | qr.is_dark(r, c) as u32;
        }
        assert_eq!(read, exp);

        let side = crate::common::metadata::FORMAT_INFO_COORDS_SIDE;
        let mut read = 0u32;
        for (r, c) in side {
            read = (read << 1) | qr.is_dark(r, c) as u32;
        }
        assert_eq!(read, exp);
    }

    // A placed symbol has no empty cells left and the number of data modules
    // matches the version's code word capacity for every version.
    #[test]
    fn test_placement_fills_every_version() {
        for v in 1..=40 {
            let ver = Version::new(v);
            let qr = QRBuilder::new(b"COVERAGE")
                .version(ver)
                .ec_level(ECLevel::L)
                .build()
                .unwrap();
            let data_modules = ZigzagIter::new(ver)
                .filter(|(r, c)| matches!(qr.get(*r, *c), Module::Data(_)))
                .count();
            assert_eq!(data_modules, ver.total_bits(), "v{v}");
        }
    }

    #[test]
    fn test_dark_module_is_always_dark() {
        for data in [&b"A"[..], b"12345", b"mixed Case"] {
            let qr = QRBuilder::new(data).build().unwrap();
            assert!(qr.is_dark(-8, 8));
        }
    }
}
