//! # qrbmp
//!
//! A QR code generator (JIS X 0510) that serializes straight to a minimal
//! 1-bit-per-pixel BMP image. Encoding covers versions 1-40, all four error
//! correction levels, numeric/alphanumeric/byte modes with automatic mode
//! sniffing, Reed-Solomon error correction over GF(256) and automatic mask
//! selection by penalty score.
//!
//! ## Quick Start
//!
//! ```rust
//! use qrbmp::{ECLevel, QRBuilder};
//!
//! # fn main() -> Result<(), qrbmp::QRError> {
//! let qr = QRBuilder::new(b"HELLO WORLD").ec_level(ECLevel::M).build()?;
//!
//! let bmp = qr.to_bmp();
//! assert_eq!(&bmp[..2], b"BM");
//! # Ok(())
//! # }
//! ```
//!
//! ### Full configuration
//!
//! ```rust
//! use qrbmp::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), qrbmp::QRError> {
//! let qr = QRBuilder::new(b"HELLO WORLD")
//!     .version(Version::new(2))   // pin the version instead of searching
//!     .ec_level(ECLevel::Q)       // defaults to ECLevel::L
//!     .mask(MaskPattern::new(3))  // skip the penalty-based mask search
//!     .build()?;
//!
//! assert_eq!(qr.width(), 25);
//! # Ok(())
//! # }
//! ```
//!
//! Every encode is pure and independent; the GF(256) tables, generator
//! polynomials and per-version base matrices are process-wide immutable
//! caches, so sharing the library across threads needs no locking.

pub mod builder;
pub(crate) mod common;

pub use builder::{QRBuilder, QR};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Version};

/// Encodes `text` at the given error correction level, choosing mode and
/// version automatically.
///
/// ```rust
/// let qr = qrbmp::generate("HELLO WORLD", qrbmp::ECLevel::L).unwrap();
/// assert_eq!(qr.width(), 21);
/// ```
pub fn generate(text: &str, ec_level: ECLevel) -> QRResult<QR> {
    QRBuilder::new(text.as_bytes()).ec_level(ec_level).build()
}
