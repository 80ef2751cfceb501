//! # Symbologies
//!
//! Every supported barcode type implements the [`Encoder`] trait. The set of
//! types is closed: [`Symbology`] names each one and [`Symbology::encoder`]
//! dispatches to a static encoder instance.
//!
//! | Symbology | Encoder | Raw text |
//! |-----------|---------|----------|
//! | `EAN13` / `EAN8` | [`ean::Ean`] | the digits, unchanged |
//! | `code128` / `EAN128` | [`code128::Code128`] | codewords picked by the subset parser |
//! | `code128A` | [`code128::Code128`] | codewords, subset A only |
//! | `code128raw` | [`code128::Code128`] | the text, taken as codewords |
//! | `2/5 interleave` | [`interleaved::Interleaved2of5`] | digits only |
//!
//! ## Example
//!
//! ```
//! use linebar::symbology::Symbology;
//!
//! let encoder = Symbology::Ean13.encoder();
//! let bars = encoder.bars("4001513000620").unwrap();
//! assert_eq!(bars.len(), 59);
//! assert_eq!(bars.module_width(), 95);
//! ```

pub mod code128;
pub mod ean;
pub mod interleaved;

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BarcodeError;

// ============================================================================
// SYMBOLOGY KIND
// ============================================================================

/// Barcode type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Symbology {
    /// EAN-13 (13 digits including the check digit)
    Ean13,
    /// EAN-8 (8 digits including the check digit)
    Ean8,
    /// Code 128 with automatic subset selection
    Code128,
    /// Code 128 from caller-supplied codeword values
    Code128Raw,
    /// Code 128 restricted to subset A
    Code128A,
    /// EAN-128 / UCC-128: Code 128 with a leading FNC1
    Ean128,
    /// Interleaved 2 of 5
    Interleaved2of5,
}

impl Symbology {
    /// All symbologies reachable through dispatch.
    pub const ALL: [Symbology; 7] = [
        Symbology::Ean13,
        Symbology::Ean8,
        Symbology::Code128,
        Symbology::Code128Raw,
        Symbology::Code128A,
        Symbology::Ean128,
        Symbology::Interleaved2of5,
    ];

    /// Type name as shown to users, e.g. `"EAN13"` or `"code128"`.
    pub fn name(self) -> &'static str {
        match self {
            Symbology::Ean13 => "EAN13",
            Symbology::Ean8 => "EAN8",
            Symbology::Code128 => "code128",
            Symbology::Code128Raw => "code128raw",
            Symbology::Code128A => "code128A",
            Symbology::Ean128 => "EAN128",
            Symbology::Interleaved2of5 => "2/5 interleave",
        }
    }

    /// The encoder implementing this symbology.
    pub fn encoder(self) -> &'static dyn Encoder {
        match self {
            Symbology::Ean13 => &ean::EAN13,
            Symbology::Ean8 => &ean::EAN8,
            Symbology::Code128 => &code128::CODE128,
            Symbology::Code128Raw => &code128::CODE128_RAW,
            Symbology::Code128A => &code128::CODE128_A,
            Symbology::Ean128 => &code128::EAN128,
            Symbology::Interleaved2of5 => &interleaved::INTERLEAVED_2OF5,
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbology {
    type Err = BarcodeError;

    /// Parse a symbology name. Case, spaces, `-`, `_` and `/` are ignored, so
    /// `"EAN-13"`, `"ean13"` and `"2/5 interleave"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "ean13" => Ok(Symbology::Ean13),
            "ean8" => Ok(Symbology::Ean8),
            "code128" => Ok(Symbology::Code128),
            "code128raw" | "raw" => Ok(Symbology::Code128Raw),
            "code128a" => Ok(Symbology::Code128A),
            "ean128" | "code128ucc" | "ucc128" | "ucc" | "gs1128" => Ok(Symbology::Ean128),
            "25interleave" | "interleaved2of5" | "code25inter" | "itf" | "i25" => {
                Ok(Symbology::Interleaved2of5)
            }
            _ => Err(BarcodeError::UnknownSymbology(s.to_string())),
        }
    }
}

impl TryFrom<String> for Symbology {
    type Error = BarcodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbology> for String {
    fn from(value: Symbology) -> Self {
        value.name().to_string()
    }
}

// ============================================================================
// ENCODER OUTPUTS
// ============================================================================

/// Run lengths of alternating bars and spaces, starting with a bar.
///
/// Each entry is a width in bar units (modules). The sum of all entries times
/// the bar unit width is the printed width without quiet zones.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct BarWidths(Vec<u8>);

impl BarWidths {
    pub fn new(widths: Vec<u8>) -> Self {
        Self(widths)
    }

    /// Total width in modules (sum of all runs).
    pub fn module_width(&self) -> u32 {
        self.0.iter().map(|&w| u32::from(w)).sum()
    }

    /// Iterate `(is_bar, width)` pairs.
    pub fn runs(&self) -> impl Iterator<Item = (bool, u8)> + '_ {
        self.0.iter().enumerate().map(|(i, &w)| (i % 2 == 0, w))
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for BarWidths {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

/// Offset of one label character, relative to the left edge of the bars
/// (quiet zone excluded) and the text baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CharPosition {
    pub x: f32,
    pub y: f32,
}

impl CharPosition {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// ENCODER CONTRACT
// ============================================================================

/// Capability set shared by all symbologies.
///
/// Implementations hold no state besides their variant, so every method is a
/// pure function of its arguments.
pub trait Encoder: Send + Sync {
    /// The symbology this encoder produces.
    fn symbology(&self) -> Symbology;

    /// Convert the code text into the text that is actually encoded.
    ///
    /// For Code 128 this is the codeword sequence (one `char` per codeword
    /// value, start code first, checksum excluded). Other symbologies return
    /// the text itself or a filtered copy.
    fn raw_text(&self, text: &str) -> Result<String, BarcodeError>;

    /// Convert the code text into the label printed with the bars.
    fn human_text(&self, text: &str) -> Result<String, BarcodeError> {
        Ok(text.to_string())
    }

    /// Compute the bar/space run lengths for `text`.
    fn bars(&self, text: &str) -> Result<BarWidths, BarcodeError>;

    /// Sorted indices into [`Encoder::bars`] of runs drawn as tall guard bars.
    fn guard_bar_indices(&self) -> &'static [usize] {
        &[]
    }

    /// Per-character label offsets, for symbologies that position each digit.
    fn char_positions(&self) -> Vec<CharPosition> {
        Vec::new()
    }
}

/// Get an encoder by symbology name.
pub fn by_name(name: &str) -> Option<&'static dyn Encoder> {
    name.parse::<Symbology>().ok().map(Symbology::encoder)
}

/// List the names of all symbologies.
pub fn list_symbologies() -> Vec<&'static str> {
    Symbology::ALL.iter().map(|s| s.name()).collect()
}

/// Keep the ASCII digits of `text`, in order.
pub fn keep_numbers(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}
