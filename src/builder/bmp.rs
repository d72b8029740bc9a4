use super::qr::QR;

// BMP serialization
//------------------------------------------------------------------------------

// File header, BITMAPCOREHEADER and the 2-entry palette together
const HEADER_LEN: usize = 0x20;

impl QR {
    /// Serializes the matrix into a 1-bit-per-pixel BMP byte stream: a fixed
    /// 32-byte header with a white/black palette, then the rows packed
    /// MSB-first, padded to 4-byte boundaries and written bottom-up.
    pub fn to_bmp(&self) -> Vec<u8> {
        let w = self.width();
        // row length in bytes at 1 bit per pixel, padded to a 4-byte multiple
        let row_len = (w + 31) / 32 * 4;
        let total_len = HEADER_LEN + row_len * w;

        let mut out = Vec::with_capacity(total_len);
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(total_len as u32).to_le_bytes());
        out.extend_from_slice(&[0; 4]); // reserved
        out.extend_from_slice(&(HEADER_LEN as u32).to_le_bytes()); // pixel data offset

        out.extend_from_slice(&12u32.to_le_bytes()); // core DIB header length
        out.extend_from_slice(&(w as u16).to_le_bytes());
        out.extend_from_slice(&(w as u16).to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // color planes
        out.extend_from_slice(&1u16.to_le_bytes()); // bits per pixel

        out.extend_from_slice(&[0xff, 0xff, 0xff]); // palette 0: white
        out.extend_from_slice(&[0x00, 0x00, 0x00]); // palette 1: black

        // rows bottom-up, dark modules as 1 bits
        for r in (0..w as i16).rev() {
            let mut row = vec![0u8; row_len];
            for c in 0..w {
                if self.is_dark(r, c as i16) {
                    row[c >> 3] |= 0x80 >> (c & 7);
                }
            }
            out.extend_from_slice(&row);
        }

        debug_assert!(out.len() == total_len, "BMP length mismatch");
        out
    }
}
