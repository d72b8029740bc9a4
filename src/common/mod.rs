pub mod bitstream;
pub mod codec;
pub mod ec;
pub mod error;
pub mod iter;
pub mod mask;
pub mod metadata;

pub use bitstream::BitStream;
pub use codec::Mode;
pub use error::{QRError, QRResult};
pub use mask::MaskPattern;
pub use metadata::{Color, ECLevel, Version};
