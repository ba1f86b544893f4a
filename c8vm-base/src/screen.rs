use std::fmt::{Debug, Write};

/// The 64x32 monochrome framebuffer.
///
/// Pixels are packed eight to a byte, the most significant bit being the leftmost pixel.
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct Screen {
    pixel_data: [u8; Self::WIDTH_BYTES * Self::HEIGHT as usize],
}

impl Screen {
    pub const WIDTH_BYTES: usize = 8;
    pub const WIDTH: u8 = Self::WIDTH_BYTES as u8 * u8::BITS as u8;
    pub const HEIGHT: u8 = 32;

    /// XOR `byte` onto the screen byte at `byte_x*8` and `y`.
    ///
    /// Returns `true` if a set pixel has been unset, `false` otherwise.
    fn draw_byte(&mut self, byte_x: usize, y: usize, byte: u8) -> bool {
        let screen_byte = &mut self.pixel_data[byte_x + y * Self::WIDTH_BYTES];
        // A one in both the screen byte and the sprite byte unsets a set pixel.
        let set_pixel_unset = (*screen_byte & byte) > 0;

        *screen_byte ^= byte;

        set_pixel_unset
    }

    /// XOR a sprite onto the screen with its top left corner at (`x`, `y`).
    /// Each sprite byte is one row of 8 pixels.
    ///
    /// Coordinates wrap around in both dimensions, both for the starting position
    /// and for the parts of the sprite that would land offscreen.
    ///
    /// Returns `true` if any set pixel has been unset (a collision), `false` otherwise.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let x = (x % Self::WIDTH) as usize;
        let y = (y % Self::HEIGHT) as usize;
        let bit_offset = x % 8;
        let mut set_pixel_unset = false;

        for (i, sprite_byte) in sprite.iter().copied().enumerate() {
            let y = (y + i) % Self::HEIGHT as usize;

            set_pixel_unset |= self.draw_byte(x / 8, y, sprite_byte >> bit_offset);

            // Byte aligned, so the row fits into a single screen byte.
            if bit_offset == 0 {
                continue;
            }

            // The remaining bits go into the next screen byte, wrapping around in X.
            let rem_sprite_byte = sprite_byte << (8 - bit_offset);
            let rem_byte_x = (x / 8 + 1) % Self::WIDTH_BYTES;

            set_pixel_unset |= self.draw_byte(rem_byte_x, y, rem_sprite_byte);
        }

        set_pixel_unset
    }

    pub fn clear(&mut self) {
        self.pixel_data.fill(0);
    }

    /// Whether the pixel at (`x`, `y`) is set.
    /// Coordinates wrap around like they do when drawing.
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        let x = (x % Self::WIDTH) as usize;
        let y = (y % Self::HEIGHT) as usize;
        self.pixel_data[x / 8 + y * Self::WIDTH_BYTES] >> (7 - x % 8) & 1 > 0
    }

    /// The packed pixel data, row by row.
    pub fn pixel_data(&self) -> &[u8] {
        &self.pixel_data
    }

    /// Iterate over the rows of the screen, each yielding its pixels from left to right.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = bool> + '_> + '_ {
        self.pixel_data.chunks_exact(Self::WIDTH_BYTES).map(|row| {
            row.iter()
                .copied()
                .flat_map(|screen_byte| (0..8).rev().map(move |i| screen_byte >> i & 1 > 0))
        })
    }

    pub fn is_blank(&self) -> bool {
        self.pixel_data.iter().all(|&byte| byte == 0)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            pixel_data: [0; Self::WIDTH_BYTES * Self::HEIGHT as usize],
        }
    }
}

impl Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "Screen(")?;
            for row in self.rows() {
                for pixel_on in row {
                    f.write_char(if pixel_on { '#' } else { '_' })?;
                }
                f.write_char('\n')?;
            }
            write!(f, ")")
        } else {
            f.debug_tuple("Screen").field(&self.pixel_data).finish()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn draw_sprite_byte_aligned() {
        let mut screen = Screen::default();

        assert!(!screen.draw_sprite(0, 0, &[0xFF]));
        assert!((0..8).all(|x| screen.pixel(x, 0)));
        assert!(!screen.pixel(8, 0));
        assert!(!screen.pixel(0, 1));

        // Drawing the same sprite again erases it and reports the collision.
        assert!(screen.draw_sprite(0, 0, &[0xFF]));
        assert!(screen.is_blank());
    }

    #[test]
    fn draw_sprite_unaligned() {
        let mut screen = Screen::default();

        screen.draw_sprite(5, 3, &[0b1010_0001]);

        assert!(screen.pixel(5, 3));
        assert!(!screen.pixel(6, 3));
        assert!(screen.pixel(7, 3));
        assert!(!screen.pixel(8, 3));
        assert!(screen.pixel(12, 3));
    }

    #[test]
    fn draw_sprite_wraps_x_and_y() {
        let mut screen = Screen::default();

        screen.draw_sprite(60, 31, &[0xFF, 0x80]);

        // Row 31, columns 60..=63 and 0..=3
        assert!((60..64).all(|x| screen.pixel(x, 31)));
        assert!((0..4).all(|x| screen.pixel(x, 31)));
        assert!(!screen.pixel(4, 31));
        // Second row wraps to the top
        assert!(screen.pixel(60, 0));
        assert!(!screen.pixel(61, 0));
    }

    #[test]
    fn draw_sprite_starting_offscreen() {
        let mut screen = Screen::default();

        screen.draw_sprite(64 + 2, 32 + 1, &[0x80]);

        assert!(screen.pixel(2, 1));
    }

    #[test]
    fn collision_only_when_pixel_unset() {
        let mut screen = Screen::default();

        screen.draw_sprite(0, 0, &[0b1100_0000]);

        assert!(!screen.draw_sprite(2, 0, &[0b1100_0000]));
        assert!(screen.draw_sprite(1, 0, &[0b1000_0000]));
        assert!(!screen.pixel(1, 0));
    }

    #[test]
    fn clear() {
        let mut screen = Screen::default();
        screen.draw_sprite(10, 10, &[0xAA, 0x55]);

        screen.clear();

        assert_eq!(screen, Screen::default());
    }

    #[test]
    fn debug_alternate() {
        let mut screen = Screen::default();
        screen.draw_sprite(0, 0, &[0xC0]);

        let rendered = format!("{:#?}", screen);
        let first_row = rendered.lines().nth(1).unwrap();

        assert_eq!(first_row.len(), Screen::WIDTH as usize);
        assert!(first_row.starts_with("##_"));
    }
}
