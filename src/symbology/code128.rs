//! # Code 128
//!
//! Encoder for the Code 128 family:
//!
//! | Variant | Behavior |
//! |---------|----------|
//! | `code128` | greedy subset selection between A, B and C |
//! | `EAN128` | as `code128`, with FNC1 right after the start codeword |
//! | `code128A` | every character forced into subset A |
//! | `code128raw` | the text already is the codeword sequence |
//!
//! ## Subsets
//!
//! - **A**: control characters, digits, uppercase letters and symbols (`0x00`-`0x5F`)
//! - **B**: all printable ASCII (`0x20`-`0x7F`)
//! - **C**: digit pairs `00`-`99`, one codeword per pair
//!
//! Subset changes use the switch codewords (99, 100, 101), never the
//! single-character shift.
//!
//! ## Layout
//!
//! ```text
//! [start] [FNC1]? [data ...] [checksum] [stop]
//!  6 runs           6 runs     6 runs    7 runs
//! ```
//!
//! The checksum is `(start + Σ i·codeword[i]) mod 103`, where `i` counts
//! data codewords from 1.

use tracing::{debug, trace};

use super::{BarWidths, Encoder, Symbology};
use crate::ean128;
use crate::error::BarcodeError;

/// Switch to subset C (from A or B).
pub const CODE_C: u8 = 99;
/// Switch to subset B (from A or C).
pub const CODE_B: u8 = 100;
/// Switch to subset A (from B or C).
pub const CODE_A: u8 = 101;
/// Function code 1, the EAN-128 / UCC marker and field separator.
pub const FNC1: u8 = 102;
pub const START_A: u8 = 103;
pub const START_B: u8 = 104;
pub const START_C: u8 = 105;

/// Separates raw codewords from trailing human-readable text in raw mode.
pub const RAW_TEXT_SEPARATOR: char = '\u{FFFF}';

/// The stop pattern, the only symbol with 7 runs.
pub const STOP: [u8; 7] = [2, 3, 3, 1, 1, 1, 2];

/// Bar patterns for codeword values 0-105.
#[rustfmt::skip]
static PATTERNS: [[u8; 6]; 106] = [
    [2, 1, 2, 2, 2, 2], [2, 2, 2, 1, 2, 2], [2, 2, 2, 2, 2, 1], [1, 2, 1, 2, 2, 3], [1, 2, 1, 3, 2, 2], // 0
    [1, 3, 1, 2, 2, 2], [1, 2, 2, 2, 1, 3], [1, 2, 2, 3, 1, 2], [1, 3, 2, 2, 1, 2], [2, 2, 1, 2, 1, 3], // 5
    [2, 2, 1, 3, 1, 2], [2, 3, 1, 2, 1, 2], [1, 1, 2, 2, 3, 2], [1, 2, 2, 1, 3, 2], [1, 2, 2, 2, 3, 1], // 10
    [1, 1, 3, 2, 2, 2], [1, 2, 3, 1, 2, 2], [1, 2, 3, 2, 2, 1], [2, 2, 3, 2, 1, 1], [2, 2, 1, 1, 3, 2], // 15
    [2, 2, 1, 2, 3, 1], [2, 1, 3, 2, 1, 2], [2, 2, 3, 1, 1, 2], [3, 1, 2, 1, 3, 1], [3, 1, 1, 2, 2, 2], // 20
    [3, 2, 1, 1, 2, 2], [3, 2, 1, 2, 2, 1], [3, 1, 2, 2, 1, 2], [3, 2, 2, 1, 1, 2], [3, 2, 2, 2, 1, 1], // 25
    [2, 1, 2, 1, 2, 3], [2, 1, 2, 3, 2, 1], [2, 3, 2, 1, 2, 1], [1, 1, 1, 3, 2, 3], [1, 3, 1, 1, 2, 3], // 30
    [1, 3, 1, 3, 2, 1], [1, 1, 2, 3, 1, 3], [1, 3, 2, 1, 1, 3], [1, 3, 2, 3, 1, 1], [2, 1, 1, 3, 1, 3], // 35
    [2, 3, 1, 1, 1, 3], [2, 3, 1, 3, 1, 1], [1, 1, 2, 1, 3, 3], [1, 1, 2, 3, 3, 1], [1, 3, 2, 1, 3, 1], // 40
    [1, 1, 3, 1, 2, 3], [1, 1, 3, 3, 2, 1], [1, 3, 3, 1, 2, 1], [3, 1, 3, 1, 2, 1], [2, 1, 1, 3, 3, 1], // 45
    [2, 3, 1, 1, 3, 1], [2, 1, 3, 1, 1, 3], [2, 1, 3, 3, 1, 1], [2, 1, 3, 1, 3, 1], [3, 1, 1, 1, 2, 3], // 50
    [3, 1, 1, 3, 2, 1], [3, 3, 1, 1, 2, 1], [3, 1, 2, 1, 1, 3], [3, 1, 2, 3, 1, 1], [3, 3, 2, 1, 1, 1], // 55
    [3, 1, 4, 1, 1, 1], [2, 2, 1, 4, 1, 1], [4, 3, 1, 1, 1, 1], [1, 1, 1, 2, 2, 4], [1, 1, 1, 4, 2, 2], // 60
    [1, 2, 1, 1, 2, 4], [1, 2, 1, 4, 2, 1], [1, 4, 1, 1, 2, 2], [1, 4, 1, 2, 2, 1], [1, 1, 2, 2, 1, 4], // 65
    [1, 1, 2, 4, 1, 2], [1, 2, 2, 1, 1, 4], [1, 2, 2, 4, 1, 1], [1, 4, 2, 1, 1, 2], [1, 4, 2, 2, 1, 1], // 70
    [2, 4, 1, 2, 1, 1], [2, 2, 1, 1, 1, 4], [4, 1, 3, 1, 1, 1], [2, 4, 1, 1, 1, 2], [1, 3, 4, 1, 1, 1], // 75
    [1, 1, 1, 2, 4, 2], [1, 2, 1, 1, 4, 2], [1, 2, 1, 2, 4, 1], [1, 1, 4, 2, 1, 2], [1, 2, 4, 1, 1, 2], // 80
    [1, 2, 4, 2, 1, 1], [4, 1, 1, 2, 1, 2], [4, 2, 1, 1, 1, 2], [4, 2, 1, 2, 1, 1], [2, 1, 2, 1, 4, 1], // 85
    [2, 1, 4, 1, 2, 1], [4, 1, 2, 1, 2, 1], [1, 1, 1, 1, 4, 3], [1, 1, 1, 3, 4, 1], [1, 3, 1, 1, 4, 1], // 90
    [1, 1, 4, 1, 1, 3], [1, 1, 4, 3, 1, 1], [4, 1, 1, 1, 1, 3], [4, 1, 1, 3, 1, 1], [1, 1, 3, 1, 4, 1], // 95
    [1, 1, 4, 1, 3, 1], [3, 1, 1, 1, 4, 1], [4, 1, 1, 1, 3, 1], [2, 1, 1, 4, 1, 2], [2, 1, 1, 2, 1, 4], // 100
    [2, 1, 1, 2, 3, 2], // 105
];

pub static CODE128: Code128 = Code128::new(Code128Mode::Standard);
pub static EAN128: Code128 = Code128::new(Code128Mode::Ean128);
pub static CODE128_A: Code128 = Code128::new(Code128Mode::SubsetA);
pub static CODE128_RAW: Code128 = Code128::new(Code128Mode::Raw);

/// How the text is turned into codewords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code128Mode {
    /// Automatic subset selection
    Standard,
    /// Automatic subset selection with leading FNC1
    Ean128,
    /// Subset A only
    SubsetA,
    /// Text is taken as codeword values
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subset {
    A,
    B,
    C,
}

impl Subset {
    fn start(self) -> u8 {
        match self {
            Subset::A => START_A,
            Subset::B => START_B,
            Subset::C => START_C,
        }
    }

    fn switch(self) -> u8 {
        match self {
            Subset::A => CODE_A,
            Subset::B => CODE_B,
            Subset::C => CODE_C,
        }
    }
}

/// Code 128 encoder for one [`Code128Mode`].
#[derive(Debug, Clone, Copy)]
pub struct Code128 {
    mode: Code128Mode,
}

impl Code128 {
    pub const fn new(mode: Code128Mode) -> Self {
        Self { mode }
    }

    /// Convert `text` into codeword values, start codeword first and without
    /// checksum or stop.
    pub fn codewords(&self, text: &str) -> Result<Vec<u8>, BarcodeError> {
        match self.mode {
            Code128Mode::Standard => encode_auto(text, false, Symbology::Code128.name()),
            Code128Mode::Ean128 => encode_auto(text, true, Symbology::Ean128.name()),
            Code128Mode::SubsetA => encode_subset_a(text),
            Code128Mode::Raw => raw_codewords(text),
        }
    }
}

impl Encoder for Code128 {
    fn symbology(&self) -> Symbology {
        match self.mode {
            Code128Mode::Standard => Symbology::Code128,
            Code128Mode::Ean128 => Symbology::Ean128,
            Code128Mode::SubsetA => Symbology::Code128A,
            Code128Mode::Raw => Symbology::Code128Raw,
        }
    }

    fn raw_text(&self, text: &str) -> Result<String, BarcodeError> {
        if self.mode == Code128Mode::Raw {
            return Ok(text.to_string());
        }
        Ok(self.codewords(text)?.into_iter().map(char::from).collect())
    }

    fn human_text(&self, text: &str) -> Result<String, BarcodeError> {
        match self.mode {
            Code128Mode::Ean128 => ean128::to_human_text(text),
            _ => Ok(text.to_string()),
        }
    }

    fn bars(&self, text: &str) -> Result<BarWidths, BarcodeError> {
        let codewords = self.codewords(text)?;
        Ok(assemble(&codewords))
    }
}

// ============================================================================
// CODEWORD GENERATION
// ============================================================================

/// True if `chars[index..index + count]` exists and is all ASCII digits.
fn has_digits(chars: &[char], index: usize, count: usize) -> bool {
    chars
        .get(index..index + count)
        .is_some_and(|run| run.iter().all(char::is_ascii_digit))
}

/// Codeword for two digits in subset C.
fn pack_pair(first: char, second: char) -> u8 {
    let tens = first as u8 - b'0';
    let ones = second as u8 - b'0';
    tens * 10 + ones
}

/// Codeword for an ASCII character in subset A or B.
fn ascii_value(c: char) -> u8 {
    let code = c as u8;
    if code < b' ' { code + 64 } else { code - b' ' }
}

fn check_ascii(text: &str, symbology: &'static str) -> Result<Vec<char>, BarcodeError> {
    text.chars()
        .enumerate()
        .map(|(position, character)| {
            if character.is_ascii() {
                Ok(character)
            } else {
                Err(BarcodeError::InvalidCharacter {
                    character,
                    position,
                    symbology,
                })
            }
        })
        .collect()
}

/// Greedy subset selection.
///
/// Starts in C when the text opens with two digits, in A when it opens with a
/// control character and in B otherwise. Mid-stream, a run of four digits
/// switches to C; leaving C goes to A for control characters and B for
/// everything else; lowercase in A switches to B and control characters in B
/// switch to A. With `ean128`, the GS character is written as FNC1.
fn encode_auto(text: &str, ean128: bool, symbology: &'static str) -> Result<Vec<u8>, BarcodeError> {
    let mut chars = check_ascii(text, symbology)?;
    if ean128 {
        // the start sequence already carries the leading FNC1
        let leading = chars.iter().take_while(|&&c| c == ean128::FNC1).count();
        chars.drain(..leading);
    }
    let mut out = Vec::with_capacity(chars.len() + 4);

    let Some(&first) = chars.first() else {
        out.push(START_B);
        if ean128 {
            out.push(FNC1);
        }
        return Ok(out);
    };

    let mut subset = if has_digits(&chars, 0, 2) {
        Subset::C
    } else if first < ' ' {
        Subset::A
    } else {
        Subset::B
    };
    out.push(subset.start());
    if ean128 {
        out.push(FNC1);
    }
    debug!(?subset, "code128 start");

    let mut index = 0;
    while index < chars.len() {
        let c = chars[index];

        if ean128 && c == ean128::FNC1 {
            out.push(FNC1);
            index += 1;
            continue;
        }

        let next = match subset {
            Subset::C if has_digits(&chars, index, 2) => {
                out.push(pack_pair(c, chars[index + 1]));
                index += 2;
                continue;
            }
            Subset::A | Subset::B if has_digits(&chars, index, 4) => Subset::C,
            Subset::C if c < ' ' => Subset::A,
            Subset::C => Subset::B,
            Subset::A if c > '_' => Subset::B,
            Subset::B if c < ' ' => Subset::A,
            current => current,
        };

        if next != subset {
            debug!(from = ?subset, to = ?next, position = index, "code128 subset switch");
            out.push(next.switch());
            subset = next;
        }
        if subset != Subset::C {
            out.push(ascii_value(c));
            index += 1;
        }
    }

    Ok(out)
}

/// Every character in subset A. Lowercase maps onto the subset A control
/// range, the way the forced-A mode always has.
fn encode_subset_a(text: &str) -> Result<Vec<u8>, BarcodeError> {
    let chars = check_ascii(text, Symbology::Code128A.name())?;
    let mut out = Vec::with_capacity(chars.len() + 1);
    out.push(START_A);
    out.extend(chars.into_iter().map(ascii_value));
    Ok(out)
}

/// Codeword values taken directly from the text, up to [`RAW_TEXT_SEPARATOR`].
fn raw_codewords(text: &str) -> Result<Vec<u8>, BarcodeError> {
    let raw = text.split(RAW_TEXT_SEPARATOR).next().unwrap_or_default();
    if raw.is_empty() {
        return Err(BarcodeError::EmptyRawCode);
    }

    raw.chars()
        .enumerate()
        .map(|(position, character)| match u8::try_from(u32::from(character)) {
            Ok(value) if usize::from(value) < PATTERNS.len() => Ok(value),
            _ => Err(BarcodeError::InvalidCharacter {
                character,
                position,
                symbology: Symbology::Code128Raw.name(),
            }),
        })
        .collect()
}

// ============================================================================
// CHECKSUM AND BARS
// ============================================================================

/// Modulo-103 checksum over start and data codewords.
///
/// The start codeword and the first data codeword both carry weight 1; each
/// following codeword's weight is its position.
pub fn checksum(codewords: &[u8]) -> u8 {
    let Some((&start, data)) = codewords.split_first() else {
        return 0;
    };

    let mut sum = u32::from(start);
    for (i, &value) in data.iter().enumerate() {
        sum += (i as u32 + 1) * u32::from(value);
        trace!(position = i + 1, value, sum, "code128 checksum");
    }
    (sum % 103) as u8
}

/// Bar pattern of one codeword value, if it exists.
pub fn pattern(value: u8) -> Option<&'static [u8; 6]> {
    PATTERNS.get(usize::from(value))
}

/// Append checksum and stop, then expand every codeword into its runs.
fn assemble(codewords: &[u8]) -> BarWidths {
    let check = checksum(codewords);
    let mut bars = Vec::with_capacity((codewords.len() + 1) * 6 + STOP.len());
    for &value in codewords.iter().chain(std::iter::once(&check)) {
        bars.extend_from_slice(&PATTERNS[usize::from(value)]);
    }
    bars.extend_from_slice(&STOP);
    BarWidths::new(bars)
}
