use crate::nibble_ints::U4;

macro_rules! pixel_to_bit {
    (#) => {
        1
    };
    (,) => {
        0
    };
}

macro_rules! sprite_4x5_font {
    (
        $(
            $(
                ($pixel0:tt $pixel1:tt $pixel2:tt $pixel3:tt)
            )*
            ------
        )*
    ) => {
        [
            $(
                $(
                    // Shift pixels into high nibble / left half of the sprite.
                    (pixel_to_bit!($pixel0) << 7
                        | pixel_to_bit!($pixel1) << 6
                        | pixel_to_bit!($pixel2) << 5
                        | pixel_to_bit!($pixel3) << 4),
                )*
            )*
        ]
    };
}

/// Height of a glyph in bytes (rows).
pub const GLYPH_LEN: usize = 5;

/// Length of the font sprite data in bytes.
pub const FONT_LEN: usize = GLYPH_LEN * (U4::MAX.into_u8() as usize + 1);

/// Address of the glyph for the hex digit `digit`.
/// The font is stored in memory starting at address 0x0.
pub const fn glyph_address(digit: U4) -> u16 {
    digit.into_u8() as u16 * GLYPH_LEN as u16
}

/// The 4x5 sprite font of the hexadecimal digits 0 to F.
///
/// Since a CHIP-8 sprite is always one byte wide,
/// the low nibble is 0 for all of these character sprites.
pub const FONT: [u8; FONT_LEN] = sprite_4x5_font![
    (####)
    (#,,#)
    (#,,#)
    (#,,#)
    (####)
    ------
    (,,#,)
    (,##,)
    (,,#,)
    (,,#,)
    (,###)
    ------
    (####)
    (,,,#)
    (####)
    (#,,,)
    (####)
    ------
    (####)
    (,,,#)
    (####)
    (,,,#)
    (####)
    ------
    (#,,#)
    (#,,#)
    (####)
    (,,,#)
    (,,,#)
    ------
    (####)
    (#,,,)
    (####)
    (,,,#)
    (####)
    ------
    (####)
    (#,,,)
    (####)
    (#,,#)
    (####)
    ------
    (####)
    (,,,#)
    (,,#,)
    (,#,,)
    (,#,,)
    ------
    (####)
    (#,,#)
    (####)
    (#,,#)
    (####)
    ------
    (####)
    (#,,#)
    (####)
    (,,,#)
    (####)
    ------
    (####)
    (#,,#)
    (####)
    (#,,#)
    (#,,#)
    ------
    (###,)
    (#,,#)
    (###,)
    (#,,#)
    (###,)
    ------
    (####)
    (#,,,)
    (#,,,)
    (#,,,)
    (####)
    ------
    (###,)
    (#,,#)
    (#,,#)
    (#,,#)
    (###,)
    ------
    (####)
    (#,,,)
    (####)
    (#,,,)
    (####)
    ------
    (####)
    (#,,,)
    (####)
    (#,,,)
    (#,,,)
    ------
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn glyph_bytes() {
        // "0"
        assert_eq!(FONT[0..5], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
        // "B"
        assert_eq!(FONT[0xB * 5..0xB * 5 + 5], [0xE0, 0x90, 0xE0, 0x90, 0xE0]);
        // "F"
        assert_eq!(FONT[FONT_LEN - 5..], [0xF0, 0x80, 0xF0, 0x80, 0x80]);
    }

    #[test]
    fn glyph_addresses() {
        assert_eq!(glyph_address(U4::MIN), 0);
        assert_eq!(glyph_address(U4::from_u8_masked(0x3)), 15);
        assert_eq!(glyph_address(U4::MAX), 75);
    }
}
