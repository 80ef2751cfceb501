//! # Application Identifier Catalog
//!
//! Static table of EAN-128 application identifiers (AIs). Each entry states
//! how long the data following the identifier is and whether it is numeric.
//!
//! | Kind | Content length | Terminated by |
//! |------|----------------|---------------|
//! | fixed | exactly `content_length` | nothing, next AI follows directly |
//! | variable | at most `content_length` | FNC1 or end of data |
//!
//! Identifiers are 2 to 4 digits. An entry may also cover a range of
//! identifiers of equal width, written `"7030-7039"`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// One application identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ean128Field {
    /// Identifier digits, or an inclusive range such as `"7030-7039"`
    pub id: &'static str,
    pub description: &'static str,
    /// Exact length when `fixed_length`, otherwise the maximum
    pub content_length: usize,
    pub numeric_only: bool,
    pub fixed_length: bool,
}

impl Ean128Field {
    const fn new(
        id: &'static str,
        description: &'static str,
        content_length: usize,
        numeric_only: bool,
        fixed_length: bool,
    ) -> Self {
        Self {
            id,
            description,
            content_length,
            numeric_only,
            fixed_length,
        }
    }

    /// True when the entry covers a range of identifiers.
    pub fn is_range(&self) -> bool {
        self.id.contains('-')
    }

    /// Concrete identifiers covered by this entry, in ascending order.
    pub fn ids(&self) -> Vec<String> {
        match self.id.split_once('-') {
            Some((first, last)) => {
                let width = first.len();
                match (first.parse::<u32>(), last.parse::<u32>()) {
                    (Ok(first), Ok(last)) => (first..=last)
                        .map(|n| format!("{n:0width$}"))
                        .collect(),
                    _ => Vec::new(),
                }
            }
            None => vec![self.id.to_string()],
        }
    }

    /// True if `id` is this entry's identifier or falls inside its range.
    pub fn matches(&self, id: &str) -> bool {
        match self.id.split_once('-') {
            Some((first, last)) => {
                id.len() == first.len()
                    && id.bytes().all(|b| b.is_ascii_digit())
                    && first <= id
                    && id <= last
            }
            None => self.id == id,
        }
    }
}

// ============================================================================
// TABLE
// ============================================================================

use Ean128Field as F;

#[rustfmt::skip]
static FIELDS: &[Ean128Field] = &[
    F::new("00", "Serial shipping container code (SSCC)", 18, true, true),
    F::new("01", "Global trade item number (GTIN)", 14, true, true),
    F::new("02", "GTIN of contained trade items", 14, true, true),
    F::new("10", "Batch or lot number", 20, false, false),
    F::new("11", "Production date (YYMMDD)", 6, true, true),
    F::new("12", "Due date (YYMMDD)", 6, true, true),
    F::new("13", "Packaging date (YYMMDD)", 6, true, true),
    F::new("15", "Best before date (YYMMDD)", 6, true, true),
    F::new("17", "Expiration date (YYMMDD)", 6, true, true),
    F::new("20", "Product variant", 2, true, true),
    F::new("21", "Serial number", 20, false, false),
    F::new("240", "Additional product identification", 30, false, false),
    F::new("241", "Customer part number", 30, false, false),
    F::new("250", "Secondary serial number", 30, false, false),
    F::new("251", "Reference to source entity", 30, false, false),
    F::new("252", "Identification of an individual trade item", 27, true, true),
    F::new("30", "Variable count of items", 8, true, false),
    F::new("310", "Net weight, kilograms (variable measure)", 6, true, true),
    F::new("311", "Length or first dimension, metres (variable measure)", 6, true, true),
    F::new("312", "Width, diameter or second dimension, metres (variable measure)", 6, true, true),
    F::new("313", "Depth, thickness, height or third dimension, metres (variable measure)", 6, true, true),
    F::new("314", "Area, square metres (variable measure)", 6, true, true),
    F::new("315", "Net volume, litres (variable measure)", 6, true, true),
    F::new("316", "Net volume, cubic metres (variable measure)", 6, true, true),
    F::new("330", "Gross weight, kilograms", 6, true, true),
    F::new("331", "Length or first dimension, metres", 6, true, true),
    F::new("332", "Width, diameter or second dimension, metres", 6, true, true),
    F::new("333", "Depth, thickness, height or third dimension, metres", 6, true, true),
    F::new("334", "Area, square metres", 6, true, true),
    F::new("335", "Gross volume, litres", 6, true, true),
    F::new("336", "Gross volume, cubic metres", 6, true, true),
    F::new("337", "Kilograms per square metre", 6, true, true),
    F::new("37", "Count of trade items contained", 8, true, false),
    F::new("390", "Amount payable, local currency", 15, true, false),
    F::new("391", "Amount payable with ISO currency code", 15, true, false),
    F::new("392", "Amount payable, single monetary area", 15, true, true),
    F::new("393", "Amount payable with 3-digit ISO currency code", 18, true, false),
    F::new("400", "Customer purchase order number", 30, false, false),
    F::new("401", "Consignment number", 30, false, false),
    F::new("402", "Shipment identification number", 17, true, true),
    F::new("403", "Routing code", 30, false, false),
    F::new("410", "Ship to / deliver to global location number", 13, true, true),
    F::new("411", "Bill to / invoice to global location number", 13, true, true),
    F::new("412", "Purchased from global location number", 13, true, true),
    F::new("413", "Ship for / deliver for / forward to global location number", 13, true, true),
    F::new("414", "Identification of a physical location", 13, true, true),
    F::new("415", "Global location number of the invoicing party", 13, true, true),
    F::new("420", "Ship to postal code, single postal authority", 9, false, false),
    F::new("421", "Ship to postal code with 3-digit ISO country code", 12, false, false),
    F::new("422", "Country of origin", 3, true, true),
    F::new("423", "Country of initial processing", 15, false, false),
    F::new("424", "Country of processing", 3, true, true),
    F::new("425", "Country of disassembly", 3, true, true),
    F::new("426", "Country covering full process chain", 3, true, true),
    F::new("7001", "NATO stock number", 13, true, true),
    F::new("7002", "UN/ECE meat carcasses and cuts classification", 30, false, false),
    F::new("7030-7039", "Approval number of processor", 30, false, false),
    F::new("8001", "Roll products (width, length, core diameter, direction, splices)", 14, true, true),
    F::new("8003", "Global returnable asset identifier", 30, false, false),
    F::new("8004", "Global individual asset identifier", 30, false, false),
    F::new("8005", "Price per unit of measure", 6, true, true),
    F::new("8006", "Identification of the components of a trade item", 18, true, true),
    F::new("8007", "International bank account number (IBAN)", 30, false, false),
    F::new("8008", "Date and time of production", 12, false, false),
    F::new("8018", "Global service relation number", 18, true, true),
    F::new("8020", "Payment slip reference number", 25, false, false),
    F::new("90", "Information mutually agreed between trading partners", 30, false, false),
    F::new("91", "Company internal: raw materials, packaging, components", 30, false, false),
    F::new("92", "Company internal: raw materials, packaging, components", 30, false, false),
    F::new("93", "Company internal: manufacturer", 30, false, false),
    F::new("94", "Company internal: manufacturer", 30, false, false),
    F::new("95", "Company internal: carrier", 30, false, false),
    F::new("96", "Company internal: carrier", 30, false, false),
    F::new("97", "Company internal: wholesale and retail", 30, false, false),
    F::new("98", "Company internal: wholesale and retail", 30, false, false),
    F::new("99", "Mutually agreed text", 30, false, false),
];

/// Concrete identifier to entry. Range entries are expanded once.
static INDEX: Lazy<HashMap<String, &'static Ean128Field>> = Lazy::new(|| {
    FIELDS
        .iter()
        .flat_map(|field| field.ids().into_iter().map(move |id| (id, field)))
        .collect()
});

/// All catalog entries in identifier order.
pub fn fields() -> impl Iterator<Item = &'static Ean128Field> {
    FIELDS.iter()
}

/// Look up a concrete identifier such as `"01"` or `"7031"`.
pub fn lookup(id: &str) -> Option<&'static Ean128Field> {
    INDEX.get(id).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_fixed_and_variable() {
        let gtin = lookup("01").unwrap();
        assert_eq!(gtin.content_length, 14);
        assert!(gtin.numeric_only && gtin.fixed_length);

        let batch = lookup("10").unwrap();
        assert_eq!(batch.content_length, 20);
        assert!(!batch.numeric_only && !batch.fixed_length);
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup("14").is_none());
        assert!(lookup("7040").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_range_entry_covers_each_id() {
        for id in ["7030", "7035", "7039"] {
            assert_eq!(lookup(id).unwrap().id, "7030-7039");
        }
        // the range string itself is not a concrete identifier
        assert!(lookup("7030-7039").is_none());
    }

    #[test]
    fn test_range_matches() {
        let field = lookup("7031").unwrap();
        assert!(field.is_range());
        assert!(field.matches("7031"));
        assert!(!field.matches("7040"));
        assert!(!field.matches("703"));
        assert_eq!(field.ids().len(), 10);
    }

    #[test]
    fn test_table_is_sorted_and_unique() {
        let ids: Vec<&str> = fields().map(|f| f.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), 76);
    }

    #[test]
    fn test_identifier_widths() {
        for field in fields() {
            for id in field.ids() {
                assert!((2..=4).contains(&id.len()), "bad id {id}");
            }
        }
    }
}
