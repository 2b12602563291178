/// Packs an 8-bit RGB triple into a 16-bit RGB565 code.
///
/// Channels are truncated, not rounded: red and blue keep their top five
/// bits, green its top six.
pub const fn quantize(r: u8, g: u8, b: u8) -> u16 {
    let r = (r >> 3) as u16;
    let g = (g >> 2) as u16;
    let b = (b >> 3) as u16;

    (r << 11) | (g << 5) | b
}

/// Splits a code into the two bytes stored in the color plane.
///
/// Without `swap` the high byte comes first; with `swap` the low byte does.
pub const fn code_bytes(code: u16, swap: bool) -> [u8; 2] {
    if swap {
        code.to_le_bytes()
    } else {
        code.to_be_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_primaries() {
        assert_eq!(quantize(255, 0, 0), 0xF800);
        assert_eq!(quantize(0, 255, 0), 0x07E0);
        assert_eq!(quantize(0, 0, 255), 0x001F);
        assert_eq!(quantize(255, 255, 255), 0xFFFF);
        assert_eq!(quantize(0, 0, 0), 0x0000);
    }

    #[test]
    fn test_quantize_truncates() {
        // 7 >> 3 == 0 and 3 >> 2 == 0: nothing rounds up
        assert_eq!(quantize(7, 3, 7), 0);
        assert_eq!(quantize(8, 4, 8), (1 << 11) | (1 << 5) | 1);
    }

    #[test]
    fn test_quantize_matches_formula_exhaustively() {
        for r in 0..=255u8 {
            for g in (0..=255u8).step_by(3) {
                for b in (0..=255u8).step_by(5) {
                    let expected =
                        (((r as u16) >> 3) << 11) | (((g as u16) >> 2) << 5) | ((b as u16) >> 3);
                    assert_eq!(quantize(r, g, b), expected);
                    assert_eq!(quantize(r, g, b), quantize(r, g, b));
                }
            }
        }
    }

    #[test]
    fn test_code_bytes_order() {
        assert_eq!(code_bytes(0xF800, false), [0xF8, 0x00]);
        assert_eq!(code_bytes(0xF800, true), [0x00, 0xF8]);
        assert_eq!(code_bytes(0x07E0, false), [0x07, 0xE0]);
        assert_eq!(code_bytes(0x07E0, true), [0xE0, 0x07]);
    }
}
