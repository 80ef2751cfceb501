//! # Barcode Rendering
//!
//! Rasterizes a [`BarcodeSpec`] into a grayscale image: white background,
//! black bars, and the human-readable label drawn with a Spleen bitmap font.
//!
//! ## Geometry
//!
//! All sizes below are in pixels before magnification; the whole image is
//! then scaled by the integer part of [`BarcodeSpec::magnification`].
//!
//! ```text
//! width  = modules × bar_width + 2 × quiet_zone
//! height = 1 + bar_height + 1                       no text
//!        = 1 + bar_height + 1 + baseline            text below (baseline > 0)
//!        = 1 + font_size + |baseline| + bar_height + 1   text above
//! ```
//!
//! Guard bars are extended by `baseline / 2` when guard bars are enabled and
//! the text is drawn below the bars.
//!
//! ## Example
//!
//! ```
//! use linebar::barcode::BarcodeSpec;
//! use linebar::render;
//! use linebar::symbology::Symbology;
//!
//! let spec = BarcodeSpec::new(Symbology::Ean8);
//! let image = render::render(&spec).unwrap();
//! assert_eq!(image.width(), 67 + 2 * 10);
//! ```

pub mod font;

use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};
use thiserror::Error;
use tracing::debug;

use crate::barcode::{BarcodeSpec, TextAlignment};
use crate::error::BarcodeError;
use crate::symbology::BarWidths;
use font::LabelFont;

const INK: Luma<u8> = Luma([0]);
const PAPER: Luma<u8> = Luma([255]);

/// Errors that can occur while rendering or exporting a barcode.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Barcode(#[from] BarcodeError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("font error: {0}")]
    Font(String),

    #[error("unsupported image format for '{0}', expected .png or .jpg")]
    UnsupportedFormat(String),

    #[error("barcode image too large")]
    TooLarge,
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Pixel geometry of one rendered barcode, magnification applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub magnification: u32,
    pub width: u32,
    pub height: u32,
    /// Left edge of the first bar
    pub bars_left: u32,
    /// Width of all bars, quiet zones excluded
    pub bars_width: u32,
    /// First row of the bars
    pub bars_top: u32,
    pub bar_height: u32,
    /// Extra rows added below guard bars
    pub guard_extension: u32,
    /// First row of the label cells
    pub text_top: i64,
}

impl Layout {
    /// Compute the geometry, failing with [`RenderError::TooLarge`] when a
    /// dimension overflows or the image would exceed [`MAX_PIXELS`].
    pub fn new(spec: &BarcodeSpec, bars: &BarWidths) -> Result<Self, RenderError> {
        let mag = (spec.magnification as u32).max(1);
        let scale = |value: u32| value.checked_mul(mag).ok_or(RenderError::TooLarge);

        let bars_width = bars
            .module_width()
            .checked_mul(spec.bar_width)
            .ok_or(RenderError::TooLarge)?;
        let text_below = spec.draw_text && spec.baseline > 0;
        let text_above = spec.draw_text && spec.baseline <= 0;
        let baseline = spec.baseline.unsigned_abs();

        let top = if text_above {
            sum(&[1, spec.font_size, baseline])?
        } else {
            1
        };
        let bars_bottom = sum(&[top, spec.bar_height])?;
        let height = sum(&[bars_bottom, 1, if text_below { baseline } else { 0 }])?;
        let width = sum(&[bars_width, spec.quiet_zone, spec.quiet_zone])?;

        let guard_extension = if spec.guard_bars && text_below {
            baseline / 2
        } else {
            0
        };

        let font_height = scale(spec.font_size)?;
        check_area(font_height / 2, font_height)?;
        let font = LabelFont::for_height(font_height as usize);
        let text_top = if text_above {
            i64::from(mag)
        } else {
            i64::from(scale(sum(&[bars_bottom, baseline])?)?) - font.ascent() as i64
        };

        let layout = Self {
            magnification: mag,
            width: scale(width)?,
            height: scale(height)?,
            bars_left: scale(spec.quiet_zone)?,
            bars_width: scale(bars_width)?,
            bars_top: scale(top)?,
            bar_height: scale(spec.bar_height)?,
            guard_extension: scale(guard_extension)?,
            text_top,
        };
        check_area(layout.width, layout.height)?;
        Ok(layout)
    }
}

/// Largest image, in pixels, the renderer will allocate.
pub const MAX_PIXELS: u64 = 1 << 28;

fn sum(values: &[u32]) -> Result<u32, RenderError> {
    values
        .iter()
        .try_fold(0u32, |acc, &v| acc.checked_add(v))
        .ok_or(RenderError::TooLarge)
}

fn check_area(width: u32, height: u32) -> Result<(), RenderError> {
    if u64::from(width) * u64::from(height) > MAX_PIXELS {
        return Err(RenderError::TooLarge);
    }
    Ok(())
}

// ============================================================================
// RENDERING
// ============================================================================

/// Render `spec` with its own human-readable text.
pub fn render(spec: &BarcodeSpec) -> Result<GrayImage, RenderError> {
    render_with_text(spec, None)
}

/// Render `spec`, drawing `replacement_text` instead of the human-readable
/// text when given.
pub fn render_with_text(
    spec: &BarcodeSpec,
    replacement_text: Option<&str>,
) -> Result<GrayImage, RenderError> {
    let bars = spec.bars()?;
    let layout = Layout::new(spec, &bars)?;
    debug!(
        symbology = %spec.symbology,
        width = layout.width,
        height = layout.height,
        "rendering barcode"
    );

    let mut image = GrayImage::from_pixel(layout.width, layout.height, PAPER);
    draw_bars(&mut image, spec, &bars, &layout);

    if spec.draw_text {
        let text = match replacement_text {
            Some(text) => text.to_string(),
            None => spec.human_text()?,
        };
        draw_label(&mut image, spec, &text, &layout)?;
    }

    Ok(image)
}

/// Render `spec` and save it; the format follows the file extension.
pub fn export(spec: &BarcodeSpec, path: impl AsRef<Path>) -> Result<(), RenderError> {
    let path = path.as_ref();
    let format = match ImageFormat::from_path(path) {
        Ok(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => format,
        _ => return Err(RenderError::UnsupportedFormat(path.display().to_string())),
    };

    let image = render(spec)?;
    image.save_with_format(path, format)?;
    debug!(path = %path.display(), "exported barcode");
    Ok(())
}

fn draw_bars(image: &mut GrayImage, spec: &BarcodeSpec, bars: &BarWidths, layout: &Layout) {
    let guards = spec.guard_bar_indices();
    let unit = spec.bar_width * layout.magnification;
    let mut x = layout.bars_left;

    for (index, (is_bar, width)) in bars.runs().enumerate() {
        let run = u32::from(width) * unit;
        if is_bar {
            let mut height = layout.bar_height;
            if guards.binary_search(&index).is_ok() {
                height += layout.guard_extension;
            }
            fill_rect(image, i64::from(x), i64::from(layout.bars_top), run, height);
        }
        x += run;
    }
}

fn draw_label(
    image: &mut GrayImage,
    spec: &BarcodeSpec,
    text: &str,
    layout: &Layout,
) -> Result<(), RenderError> {
    let mag = i64::from(layout.magnification);
    let font = LabelFont::for_height((spec.font_size * layout.magnification) as usize);
    let glyphs = font.glyphs(text)?;
    let text_width = font.text_width(text) as i64;

    let left = i64::from(layout.bars_left);
    let right = left + i64::from(layout.bars_width);
    let text_x = match spec.text_alignment {
        TextAlignment::Left => left,
        TextAlignment::Right => right - text_width,
        TextAlignment::Center => left + i64::from(layout.bars_width) / 2 - text_width / 2,
    };

    if spec.use_char_positions {
        for (glyph, pos) in glyphs.iter().zip(spec.char_positions()) {
            let x = text_x + mag * pos.x as i64;
            let y = layout.text_top + mag * pos.y as i64;
            draw_glyph(image, glyph, &font, x, y);
        }
    } else {
        for (i, glyph) in glyphs.iter().enumerate() {
            let x = text_x + (i * font.char_width) as i64;
            draw_glyph(image, glyph, &font, x, layout.text_top);
        }
    }
    Ok(())
}

/// Fill a rectangle, clipped to the image.
fn fill_rect(image: &mut GrayImage, x: i64, y: i64, width: u32, height: u32) {
    for dy in 0..i64::from(height) {
        for dx in 0..i64::from(width) {
            put(image, x + dx, y + dy);
        }
    }
}

fn draw_glyph(image: &mut GrayImage, glyph: &[u8], font: &LabelFont, x: i64, y: i64) {
    for (i, &on) in glyph.iter().enumerate() {
        if on != 0 {
            let col = (i % font.char_width) as i64;
            let row = (i / font.char_width) as i64;
            put(image, x + col, y + row);
        }
    }
}

fn put(image: &mut GrayImage, x: i64, y: i64) {
    if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
        if x < image.width() && y < image.height() {
            image.put_pixel(x, y, INK);
        }
    }
}
