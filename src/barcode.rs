//! # Barcode Specification
//!
//! [`BarcodeSpec`] holds everything needed to encode and draw one barcode:
//! the symbology, the code text and the layout options. Encoding is
//! recomputed from the current fields on every call.
//!
//! ## Layout Defaults
//!
//! | Profile | Font size | Bar height | Guard bars | Char positions | Alignment |
//! |---------|-----------|------------|------------|----------------|-----------|
//! | [`LayoutDefaults::CODE128`] | 8 | 24 | no | no | center |
//! | [`LayoutDefaults::EAN`] | 9 | 27 | yes | yes | left |
//! | [`LayoutDefaults::INTERLEAVED`] | 8 | 24 | no | no | center |
//!
//! ## Example
//!
//! ```
//! use linebar::barcode::BarcodeSpec;
//! use linebar::symbology::Symbology;
//!
//! let spec = BarcodeSpec::new(Symbology::Ean8)
//!     .code("40125435")
//!     .bar_width(2);
//! assert_eq!(spec.bars().unwrap().module_width(), 67);
//! assert_eq!(spec.human_text().unwrap(), "40125435");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BarcodeError;
use crate::symbology::{BarWidths, CharPosition, Encoder, Symbology};

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Horizontal placement of the label relative to the bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

// ============================================================================
// LAYOUT DEFAULTS
// ============================================================================

/// Per-family layout profile applied by [`BarcodeSpec::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutDefaults {
    pub font_name: &'static str,
    /// Font size in pixels
    pub font_size: u32,
    /// Distance from the bottom of the bars to the text baseline; zero or
    /// negative puts the text above the bars
    pub baseline: i32,
    /// Width of one module in pixels
    pub bar_width: u32,
    pub bar_height: u32,
    /// Blank margin left and right of the bars, in pixels
    pub quiet_zone: u32,
    pub small_wide_multiplier: u32,
    pub text_alignment: TextAlignment,
    pub guard_bars: bool,
    pub use_char_positions: bool,
}

impl LayoutDefaults {
    /// Code 128 family.
    pub const CODE128: Self = Self {
        font_name: "SansSerif",
        font_size: 8,
        baseline: 8,
        bar_width: 1,
        bar_height: 8 * 3,
        quiet_zone: 10,
        small_wide_multiplier: 1,
        text_alignment: TextAlignment::Center,
        guard_bars: false,
        use_char_positions: false,
    };

    /// EAN-13 and EAN-8.
    pub const EAN: Self = Self {
        font_name: "SansSerif",
        font_size: 9,
        baseline: 9,
        bar_width: 1,
        bar_height: 9 * 3,
        quiet_zone: 10,
        small_wide_multiplier: 1,
        text_alignment: TextAlignment::Left,
        guard_bars: true,
        use_char_positions: true,
    };

    /// Interleaved 2 of 5.
    pub const INTERLEAVED: Self = Self {
        font_name: "SansSerif",
        font_size: 8,
        baseline: 8,
        bar_width: 1,
        bar_height: 8 * 3,
        quiet_zone: 10,
        small_wide_multiplier: 3,
        text_alignment: TextAlignment::Center,
        guard_bars: false,
        use_char_positions: false,
    };

    pub fn for_symbology(symbology: Symbology) -> Self {
        match symbology {
            Symbology::Ean13 | Symbology::Ean8 => Self::EAN,
            Symbology::Interleaved2of5 => Self::INTERLEAVED,
            Symbology::Code128
            | Symbology::Code128Raw
            | Symbology::Code128A
            | Symbology::Ean128 => Self::CODE128,
        }
    }
}

/// Sample code each symbology starts with.
pub fn default_code(symbology: Symbology) -> &'static str {
    match symbology {
        Symbology::Ean13 | Symbology::Interleaved2of5 => "4001513000620",
        Symbology::Ean8 => "40125435",
        // start C followed by the codewords of the Code 128 sample
        Symbology::Code128Raw => "i\u{1}\u{4}\u{1}\u{17}-!!$\u{f}\u{3}\u{c}\u{1f}\n\u{c}\"8",
        Symbology::Code128 | Symbology::Code128A | Symbology::Ean128 => {
            "01040123453333361503123110123456"
        }
    }
}

// ============================================================================
// BARCODE SPEC
// ============================================================================

/// One barcode: symbology, code text and layout.
///
/// Deserializing fills every missing field from the symbology's
/// [`LayoutDefaults`] and [`default_code`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SpecFile")]
pub struct BarcodeSpec {
    pub symbology: Symbology,
    pub code: String,
    pub magnification: f32,
    pub bar_width: u32,
    pub bar_height: u32,
    pub quiet_zone: u32,
    pub small_wide_multiplier: u32,
    pub text_alignment: TextAlignment,
    pub draw_text: bool,
    pub guard_bars: bool,
    pub font_name: String,
    pub font_size: u32,
    pub baseline: i32,
    pub use_char_positions: bool,
}

impl BarcodeSpec {
    /// Spec with the symbology's default layout and sample code.
    pub fn new(symbology: Symbology) -> Self {
        let layout = LayoutDefaults::for_symbology(symbology);
        Self {
            symbology,
            code: default_code(symbology).to_string(),
            magnification: 1.0,
            bar_width: layout.bar_width,
            bar_height: layout.bar_height,
            quiet_zone: layout.quiet_zone,
            small_wide_multiplier: layout.small_wide_multiplier,
            text_alignment: layout.text_alignment,
            draw_text: true,
            guard_bars: layout.guard_bars,
            font_name: layout.font_name.to_string(),
            font_size: layout.font_size,
            baseline: layout.baseline,
            use_char_positions: layout.use_char_positions,
        }
    }

    /// Set the code text.
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Set the magnification applied by the renderer (clamped to at least 0.1).
    pub fn magnification(mut self, magnification: f32) -> Self {
        self.magnification = magnification.max(0.1);
        self
    }

    /// Set the module width in pixels (at least 1).
    pub fn bar_width(mut self, width: u32) -> Self {
        self.bar_width = width.max(1);
        self
    }

    /// Set the bar height in pixels.
    pub fn bar_height(mut self, height: u32) -> Self {
        self.bar_height = height;
        self
    }

    /// Set the quiet zone on each side, in pixels.
    pub fn quiet_zone(mut self, width: u32) -> Self {
        self.quiet_zone = width;
        self
    }

    pub fn small_wide_multiplier(mut self, multiplier: u32) -> Self {
        self.small_wide_multiplier = multiplier;
        self
    }

    /// Left-align the label.
    pub fn left(mut self) -> Self {
        self.text_alignment = TextAlignment::Left;
        self
    }

    /// Center the label.
    pub fn center(mut self) -> Self {
        self.text_alignment = TextAlignment::Center;
        self
    }

    /// Right-align the label.
    pub fn right(mut self) -> Self {
        self.text_alignment = TextAlignment::Right;
        self
    }

    /// Draw the label or bars only.
    pub fn draw_text(mut self, draw: bool) -> Self {
        self.draw_text = draw;
        self
    }

    /// Extend the guard bars below the others.
    pub fn guard_bars(mut self, enabled: bool) -> Self {
        self.guard_bars = enabled;
        self
    }

    pub fn font(mut self, name: impl Into<String>, size: u32) -> Self {
        self.font_name = name.into();
        self.font_size = size;
        self
    }

    /// Set the text baseline offset; zero or negative draws the text above.
    pub fn baseline(mut self, baseline: i32) -> Self {
        self.baseline = baseline;
        self
    }

    /// Place each label character at the symbology's character positions.
    pub fn use_char_positions(mut self, enabled: bool) -> Self {
        self.use_char_positions = enabled;
        self
    }

    // ------------------------------------------------------------------------
    // Encoding
    // ------------------------------------------------------------------------

    pub fn encoder(&self) -> &'static dyn Encoder {
        self.symbology.encoder()
    }

    /// Bar and space run lengths for the current code.
    pub fn bars(&self) -> Result<BarWidths, BarcodeError> {
        self.encoder().bars(&self.code)
    }

    pub fn raw_text(&self) -> Result<String, BarcodeError> {
        self.encoder().raw_text(&self.code)
    }

    /// The label printed with the bars.
    pub fn human_text(&self) -> Result<String, BarcodeError> {
        self.encoder().human_text(&self.code)
    }

    pub fn guard_bar_indices(&self) -> &'static [usize] {
        self.encoder().guard_bar_indices()
    }

    pub fn char_positions(&self) -> Vec<CharPosition> {
        self.encoder().char_positions()
    }

    /// Multi-line summary: symbology, code and one line per run.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl Default for BarcodeSpec {
    fn default() -> Self {
        Self::new(Symbology::Code128)
    }
}

impl fmt::Display for BarcodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "barcode type = {}", self.symbology)?;
        write!(f, "code = '{}'", self.code)?;
        match self.bars() {
            Ok(bars) => {
                for (k, width) in bars.iter().enumerate() {
                    write!(f, "\n bar {} -> {}", k + 1, width)?;
                }
                Ok(())
            }
            Err(e) => write!(f, "\ncannot generate bars: {e}"),
        }
    }
}

// ============================================================================
// JSON FORM
// ============================================================================

impl BarcodeSpec {
    /// Parse the JSON form. A given `symbology` replaces the file's own before
    /// the missing fields are filled from its profile.
    pub fn from_json(text: &str, symbology: Option<Symbology>) -> Result<Self, serde_json::Error> {
        let mut value: serde_json::Value = serde_json::from_str(text)?;
        if let (Some(symbology), Some(object)) = (symbology, value.as_object_mut()) {
            object.insert("symbology".to_string(), symbology.name().into());
        }
        serde_json::from_value(value)
    }
}

/// On-disk form: everything but the symbology is optional.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SpecFile {
    symbology: Symbology,
    code: Option<String>,
    magnification: Option<f32>,
    bar_width: Option<u32>,
    bar_height: Option<u32>,
    quiet_zone: Option<u32>,
    small_wide_multiplier: Option<u32>,
    text_alignment: Option<TextAlignment>,
    draw_text: Option<bool>,
    guard_bars: Option<bool>,
    font_name: Option<String>,
    font_size: Option<u32>,
    baseline: Option<i32>,
    use_char_positions: Option<bool>,
}

impl From<SpecFile> for BarcodeSpec {
    fn from(file: SpecFile) -> Self {
        let d = BarcodeSpec::new(file.symbology);
        Self {
            symbology: file.symbology,
            code: file.code.unwrap_or(d.code),
            magnification: file.magnification.unwrap_or(d.magnification),
            bar_width: file.bar_width.unwrap_or(d.bar_width),
            bar_height: file.bar_height.unwrap_or(d.bar_height),
            quiet_zone: file.quiet_zone.unwrap_or(d.quiet_zone),
            small_wide_multiplier: file.small_wide_multiplier.unwrap_or(d.small_wide_multiplier),
            text_alignment: file.text_alignment.unwrap_or(d.text_alignment),
            draw_text: file.draw_text.unwrap_or(d.draw_text),
            guard_bars: file.guard_bars.unwrap_or(d.guard_bars),
            font_name: file.font_name.unwrap_or(d.font_name),
            font_size: file.font_size.unwrap_or(d.font_size),
            baseline: file.baseline.unwrap_or(d.baseline),
            use_char_positions: file.use_char_positions.unwrap_or(d.use_char_positions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_family() {
        let ean = BarcodeSpec::new(Symbology::Ean13);
        assert_eq!(ean.font_size, 9);
        assert_eq!(ean.baseline, 9);
        assert_eq!(ean.bar_height, 27);
        assert_eq!(ean.quiet_zone, 10);
        assert!(ean.guard_bars && ean.use_char_positions);
        assert_eq!(ean.text_alignment, TextAlignment::Left);
        assert_eq!(ean.code, "4001513000620");

        let code128 = BarcodeSpec::new(Symbology::Ean128);
        assert_eq!(code128.font_size, 8);
        assert_eq!(code128.bar_height, 24);
        assert!(!code128.guard_bars);
        assert_eq!(code128.text_alignment, TextAlignment::Center);

        let itf = BarcodeSpec::new(Symbology::Interleaved2of5);
        assert_eq!(itf.small_wide_multiplier, 3);
    }

    #[test]
    fn test_every_default_code_encodes() {
        for symbology in Symbology::ALL {
            let spec = BarcodeSpec::new(symbology);
            assert!(spec.bars().is_ok(), "{symbology} sample failed");
        }
    }

    #[test]
    fn test_raw_sample_matches_code128_sample() {
        let raw = BarcodeSpec::new(Symbology::Code128Raw).bars().unwrap();
        let auto = BarcodeSpec::new(Symbology::Code128).bars().unwrap();
        assert_eq!(raw, auto);
    }

    #[test]
    fn test_builder_setters() {
        let spec = BarcodeSpec::new(Symbology::Code128)
            .code("ABC")
            .bar_width(0)
            .magnification(0.0)
            .right()
            .draw_text(false)
            .font("Monospace", 12);
        assert_eq!(spec.code, "ABC");
        assert_eq!(spec.bar_width, 1);
        assert_eq!(spec.magnification, 0.1);
        assert_eq!(spec.text_alignment, TextAlignment::Right);
        assert!(!spec.draw_text);
        assert_eq!(spec.font_name, "Monospace");
    }

    #[test]
    fn test_output_follows_current_state() {
        let spec = BarcodeSpec::new(Symbology::Ean13);
        let first = spec.bars().unwrap();
        assert_eq!(first, spec.bars().unwrap());

        let spec = spec.code("5901234123457");
        assert_ne!(first, spec.bars().unwrap());
    }

    #[test]
    fn test_dispatch_guard_and_positions() {
        let ean8 = BarcodeSpec::new(Symbology::Ean8);
        assert_eq!(ean8.guard_bar_indices(), &[0, 2, 20, 22, 40, 42]);
        assert_eq!(ean8.char_positions().len(), 8);

        let code128 = BarcodeSpec::default();
        assert!(code128.guard_bar_indices().is_empty());
        assert!(code128.char_positions().is_empty());
    }

    #[test]
    fn test_describe() {
        let spec = BarcodeSpec::new(Symbology::Interleaved2of5).code("12");
        let text = spec.describe();
        assert!(text.starts_with("barcode type = 2/5 interleave\ncode = '12'"));
        assert!(text.ends_with(" bar 17 -> 1"));

        let bad = BarcodeSpec::new(Symbology::Ean13).code("123");
        assert!(bad.describe().contains("cannot generate bars"));
    }

    #[test]
    fn test_json_fills_missing_fields() {
        let spec: BarcodeSpec =
            serde_json::from_str(r#"{"symbology": "EAN8", "bar_width": 3}"#).unwrap();
        assert_eq!(spec.code, "40125435");
        assert_eq!(spec.bar_width, 3);
        assert!(spec.guard_bars);
    }

    #[test]
    fn test_json_symbology_override_uses_its_profile() {
        let json = r#"{"symbology": "code128", "bar_height": 40}"#;
        let spec = BarcodeSpec::from_json(json, Some(Symbology::Ean13)).unwrap();
        assert_eq!(spec.symbology, Symbology::Ean13);
        assert_eq!(spec.code, "4001513000620");
        assert_eq!(spec.bar_height, 40);
        assert!(spec.guard_bars);
        assert!(spec.use_char_positions);
        assert!(spec.bars().is_ok());

        let plain = BarcodeSpec::from_json(json, None).unwrap();
        assert_eq!(plain.symbology, Symbology::Code128);
        assert!(!plain.guard_bars);
    }

    #[test]
    fn test_json_override_supplies_missing_symbology() {
        let spec = BarcodeSpec::from_json(r#"{"code": "12345678"}"#, Some(Symbology::Ean8)).unwrap();
        assert_eq!(spec.symbology, Symbology::Ean8);
        assert!(BarcodeSpec::from_json(r#"{"code": "12345678"}"#, None).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let spec = BarcodeSpec::new(Symbology::Code128A).code("HELLO").left();
        let json = serde_json::to_string(&spec).unwrap();
        let back: BarcodeSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_json_rejects_unknown_symbology() {
        let result: Result<BarcodeSpec, _> = serde_json::from_str(r#"{"symbology": "qr"}"#);
        assert!(result.is_err());
    }
}
