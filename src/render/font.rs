//! Label glyphs from the Spleen bitmap fonts.
//!
//! Glyphs are scaled with nearest neighbor to a cell `font_size` pixels
//! high and half as wide. The 6x12 face is the source up to 12 pixels, the
//! 12x24 face above that.

use spleen_font::{FONT_6X12, FONT_12X24, PSF2Font};

use super::RenderError;

/// Cell size and source face for one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelFont {
    pub char_width: usize,
    pub char_height: usize,
    source: &'static [u8],
    source_width: usize,
    source_height: usize,
}

impl LabelFont {
    /// Font with cells `height` pixels high (at least 6).
    pub fn for_height(height: usize) -> Self {
        let char_height = height.max(6);
        let (source, source_width, source_height) = if char_height <= 12 {
            (FONT_6X12, 6, 12)
        } else {
            (FONT_12X24, 12, 24)
        };
        Self {
            char_width: char_height / 2,
            char_height,
            source,
            source_width,
            source_height,
        }
    }

    /// Rows of the cell above the baseline.
    pub fn ascent(&self) -> usize {
        self.char_height * 5 / 6
    }

    pub fn text_width(&self, text: &str) -> usize {
        text.chars().count() * self.char_width
    }

    /// One `char_width × char_height` bitmap per character, 1 for ink.
    ///
    /// Characters missing from the face are drawn as a box.
    pub fn glyphs(&self, text: &str) -> Result<Vec<Vec<u8>>, RenderError> {
        let mut spleen = PSF2Font::new(self.source)
            .map_err(|_| RenderError::Font("cannot load Spleen font data".to_string()))?;

        let mut out = Vec::with_capacity(text.chars().count());
        for ch in text.chars() {
            let mut glyph = vec![0u8; self.char_width * self.char_height];
            let utf8 = ch.to_string();

            if let Some(spleen_glyph) = spleen.glyph_for_utf8(utf8.as_bytes()) {
                let mut src = vec![0u8; self.source_width * self.source_height];
                for (row_y, row) in spleen_glyph.enumerate() {
                    for (col_x, on) in row.enumerate() {
                        if row_y < self.source_height && col_x < self.source_width && on {
                            src[row_y * self.source_width + col_x] = 1;
                        }
                    }
                }
                scale_bitmap(
                    &src,
                    self.source_width,
                    self.source_height,
                    &mut glyph,
                    self.char_width,
                    self.char_height,
                );
            } else {
                draw_box(&mut glyph, self.char_width, self.char_height);
            }
            out.push(glyph);
        }
        Ok(out)
    }
}

/// Scale a bitmap from src dimensions to dst dimensions using nearest neighbor.
fn scale_bitmap(
    src: &[u8],
    src_w: usize,
    src_h: usize,
    dst: &mut [u8],
    dst_w: usize,
    dst_h: usize,
) {
    for dy in 0..dst_h {
        for dx in 0..dst_w {
            let sx = dx * src_w / dst_w;
            let sy = dy * src_h / dst_h;
            if let (Some(&pixel), Some(out)) = (src.get(sy * src_w + sx), dst.get_mut(dy * dst_w + dx)) {
                *out = pixel;
            }
        }
    }
}

fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        glyph[x] = 1;
        glyph[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        glyph[y * width] = 1;
        glyph[y * width + width - 1] = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size_follows_height() {
        let small = LabelFont::for_height(8);
        assert_eq!((small.char_width, small.char_height), (4, 8));
        assert_eq!(small.ascent(), 6);

        let large = LabelFont::for_height(24);
        assert_eq!((large.char_width, large.char_height), (12, 24));

        assert_eq!(LabelFont::for_height(0).char_height, 6);
    }

    #[test]
    fn test_digit_glyphs_have_ink() {
        let font = LabelFont::for_height(24);
        let glyphs = font.glyphs("40").unwrap();
        assert_eq!(glyphs.len(), 2);
        for glyph in &glyphs {
            assert_eq!(glyph.len(), 12 * 24);
            assert!(glyph.iter().any(|&p| p != 0));
        }
    }

    #[test]
    fn test_space_is_blank() {
        let font = LabelFont::for_height(12);
        let glyphs = font.glyphs(" ").unwrap();
        assert!(glyphs[0].iter().all(|&p| p == 0));
    }

    #[test]
    fn test_text_width() {
        assert_eq!(LabelFont::for_height(10).text_width("(01)"), 20);
    }
}
