//! # Golden Tests
//!
//! Known-good bar sequences and cross-symbology invariants.
//!
//! ## Test Coverage
//!
//! - **Golden vectors**: the Code 128 sample code, checked run by run.
//! - **Length invariants**: EAN-13, EAN-8 and Interleaved 2 of 5.
//! - **Reference encoder**: EAN-13, EAN-8 and Code 128 (subset B) modules
//!   compared against the `barcoders` crate.
//! - **EAN-128 labels** and error cases through the public API.

use linebar::ean128::{self, FNC1};
use linebar::symbology::code128::{self, CODE128};
use linebar::symbology::{ean, interleaved};
use linebar::{BarWidths, BarcodeError, BarcodeSpec, Encoder, Symbology};
use pretty_assertions::assert_eq;

/// Code 128 sample code.
const SAMPLE_128: &str = "01040123453333361503123110123456";

/// Runs of [`SAMPLE_128`]: start C, 16 digit pairs, checksum 22, stop.
#[rustfmt::skip]
const SAMPLE_128_BARS: [u8; 115] = [
    2, 1, 1, 2, 3, 2,
    2, 2, 2, 1, 2, 2,
    1, 2, 1, 3, 2, 2,
    2, 2, 2, 1, 2, 2,
    3, 1, 2, 1, 3, 1,
    1, 1, 3, 1, 2, 3,
    1, 1, 1, 3, 2, 3,
    1, 1, 1, 3, 2, 3,
    1, 1, 2, 3, 1, 3,
    1, 1, 3, 2, 2, 2,
    1, 2, 1, 2, 2, 3,
    1, 1, 2, 2, 3, 2,
    2, 1, 2, 3, 2, 1,
    2, 2, 1, 3, 1, 2,
    1, 1, 2, 2, 3, 2,
    1, 3, 1, 1, 2, 3,
    3, 3, 1, 1, 2, 1,
    2, 2, 3, 1, 1, 2,
    2, 3, 3, 1, 1, 1, 2,
];

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Expand runs into one entry per module, 1 for bar and 0 for space.
fn modules(bars: &BarWidths) -> Vec<u8> {
    bars.runs()
        .flat_map(|(is_bar, width)| std::iter::repeat_n(u8::from(is_bar), usize::from(width)))
        .collect()
}

/// Append the check digit to `digits`.
fn with_check_digit(digits: &str) -> String {
    format!("{}{}", digits, ean::calculate_ean_parity(digits))
}

// ============================================================================
// CODE 128
// ============================================================================

#[test]
fn test_code128_golden_vector() {
    let bars = CODE128.bars(SAMPLE_128).unwrap();
    assert_eq!(bars.to_vec(), SAMPLE_128_BARS.to_vec());
}

#[test]
fn test_code128_golden_prefix_and_suffix() {
    let bars = CODE128.bars(SAMPLE_128).unwrap();
    assert_eq!(&bars[..16], &[2, 1, 1, 2, 3, 2, 2, 2, 2, 1, 2, 2, 1, 2, 1, 3]);
    assert_eq!(&bars[bars.len() - 8..], &[2, 2, 3, 3, 1, 1, 1, 2]);
    // 17 codewords + checksum at 6 runs each, 7-run stop
    assert_eq!(bars.len(), 18 * 6 + 7);
}

#[test]
fn test_code128_checksum_weighting() {
    let codewords = CODE128.codewords(SAMPLE_128).unwrap();
    assert_eq!(
        codewords,
        vec![105, 1, 4, 1, 23, 45, 33, 33, 36, 15, 3, 12, 31, 10, 12, 34, 56]
    );
    assert_eq!(code128::checksum(&codewords), 22);
    assert_eq!(
        &SAMPLE_128_BARS[102..108],
        code128::pattern(22).unwrap().as_slice()
    );
}

#[test]
fn test_ean128_sample_starts_with_fnc1() {
    let spec = BarcodeSpec::new(Symbology::Ean128).code(SAMPLE_128);
    let raw: Vec<u32> = spec.raw_text().unwrap().chars().map(u32::from).collect();
    assert_eq!(&raw[..3], &[105, 102, 1]);
    assert_eq!(
        spec.human_text().unwrap(),
        "(01)04012345333336(15)031231(10)123456"
    );
}

#[test]
fn test_code128_matches_reference_encoder() {
    use barcoders::sym::code128::Code128;

    for text in ["Hello", "HELLO world", "a-b+c"] {
        let ours = CODE128.bars(text).unwrap();
        let reference = Code128::new(&format!("\u{0181}{}", text)).unwrap().encode();
        assert_eq!(modules(&ours), reference, "text {text:?}");
    }
}

// ============================================================================
// EAN
// ============================================================================

#[test]
fn test_ean13_length_invariant() {
    for digits in ["400151300062", "590123412345", "000000000000", "978316148410"] {
        let code = with_check_digit(digits);
        let bars = Symbology::Ean13.encoder().bars(&code).unwrap();
        assert_eq!(bars.len(), 11 + 12 * 4, "code {code}");
        assert_eq!(bars.module_width(), 95);
    }
}

#[test]
fn test_ean8_length_invariant() {
    for digits in ["4012543", "9638507", "0000000", "1234567"] {
        let code = with_check_digit(digits);
        let bars = Symbology::Ean8.encoder().bars(&code).unwrap();
        assert_eq!(bars.len(), 11 + 8 * 4, "code {code}");
        assert_eq!(bars.module_width(), 67);
    }
}

#[test]
fn test_ean13_matches_reference_encoder() {
    use barcoders::sym::ean13::EAN13;

    for digits in ["400151300062", "590123412345", "750103131130"] {
        let ours = Symbology::Ean13.encoder().bars(&with_check_digit(digits)).unwrap();
        let reference = EAN13::new(digits).unwrap().encode();
        assert_eq!(modules(&ours), reference, "digits {digits}");
    }
}

#[test]
fn test_ean8_matches_reference_encoder() {
    use barcoders::sym::ean8::EAN8;

    for digits in ["4012543", "9638507", "5512345"] {
        let ours = Symbology::Ean8.encoder().bars(&with_check_digit(digits)).unwrap();
        let reference = EAN8::new(digits).unwrap().encode();
        assert_eq!(modules(&ours), reference, "digits {digits}");
    }
}

#[test]
fn test_parity_completes_valid_ean13() {
    let check = ean::calculate_ean_parity("400151300062");
    assert_eq!(check, 0);

    // weights 1,3,1,3... from the left over all 13 digits sum to a multiple of 10
    let code = with_check_digit("400151300062");
    let sum: u32 = code
        .chars()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { d } else { 3 * d })
        .sum();
    assert_eq!(sum % 10, 0);
}

#[test]
fn test_ean13_wrong_length_produces_no_bars() {
    let spec = BarcodeSpec::new(Symbology::Ean13).code("4001513000");
    assert_eq!(
        spec.bars(),
        Err(BarcodeError::InvalidLength {
            symbology: "EAN13",
            expected: 13,
            actual: 10,
        })
    );
}

// ============================================================================
// INTERLEAVED 2 OF 5
// ============================================================================

#[test]
fn test_interleaved_length() {
    let encoder = Symbology::Interleaved2of5.encoder();
    for n in [0usize, 2, 4, 10, 14] {
        let code = "1234567890".repeat(2)[..n].to_string();
        assert_eq!(encoder.bars(&code).unwrap().len(), (n / 2) * 10 + 7);
    }
    assert_eq!(encoder.bars("4001513000620").unwrap().len(), 67);
}

#[test]
fn test_interleaved_checksum_pads_odd_code() {
    let code = "400151300062";
    let padded = format!("{}{}", code, interleaved::checksum(code));
    assert_eq!(
        Symbology::Interleaved2of5.encoder().bars(&padded).unwrap().len(),
        67
    );
}

// ============================================================================
// EAN-128 LABELS
// ============================================================================

#[test]
fn test_ean128_label_with_fnc1() {
    let raw = format!("010401234533333610123456{}15031231", FNC1);
    assert_eq!(
        ean128::to_human_text(&raw).unwrap(),
        "(01)04012345333336(10)123456(15)031231"
    );
}

#[test]
fn test_ean128_label_is_consistent_with_encoding() {
    // the encoder writes the same separator as an FNC1 codeword
    let raw = format!("010401234533333610123456{}15031231", FNC1);
    let spec = BarcodeSpec::new(Symbology::Ean128).code(raw);
    let codewords: Vec<u32> = spec.raw_text().unwrap().chars().map(u32::from).collect();
    assert_eq!(codewords.iter().filter(|&&c| c == 102).count(), 2);
    assert_eq!(
        spec.human_text().unwrap(),
        "(01)04012345333336(10)123456(15)031231"
    );
}

#[test]
fn test_ean128_unrecognized_field() {
    assert!(matches!(
        ean128::to_human_text("0104012345333336551"),
        Err(BarcodeError::UnrecognizedField { position: 16, .. })
    ));
}

// ============================================================================
// ALL SYMBOLOGIES
// ============================================================================

#[test]
fn test_bars_are_deterministic() {
    for symbology in Symbology::ALL {
        let spec = BarcodeSpec::new(symbology);
        assert_eq!(spec.bars(), spec.bars(), "{symbology}");
        assert_eq!(spec.human_text(), spec.human_text(), "{symbology}");
    }
}

#[test]
fn test_concurrent_encoding() {
    let expected: Vec<_> = Symbology::ALL
        .iter()
        .map(|&s| BarcodeSpec::new(s).bars().unwrap())
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    Symbology::ALL
                        .iter()
                        .map(|&s| BarcodeSpec::new(s).bars().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_runs_start_and_end_with_bar() {
    for symbology in Symbology::ALL {
        let bars = BarcodeSpec::new(symbology).bars().unwrap();
        assert_eq!(bars.len() % 2, 1, "{symbology}");
        assert!(bars.iter().all(|&w| (1..=4).contains(&w)), "{symbology}");
    }
}
