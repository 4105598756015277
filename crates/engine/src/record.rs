//! Raw tabular records and their normalization into ledger candidates.
//!
//! A record comes straight from an import payload: field names may use either
//! casing and cell values are loosely typed. Normalization never fails; it
//! either produces an [`EntryCandidate`] or drops the row.

use std::fmt;

/// Accepted header names for the material name, in lookup order.
pub const NAME_FIELDS: [&str; 2] = ["Item", "item"];
/// Accepted header names for the required quantity, in lookup order.
pub const REQUIRED_FIELDS: [&str; 2] = ["Total", "total"];
/// Accepted header names for the held quantity, in lookup order.
pub const HELD_FIELDS: [&str; 2] = ["Available", "available"];

/// Placeholder used when a record carries no name.
pub const UNKNOWN_NAME: &str = "Unknown";

/// A single dynamically typed cell.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    /// Infers the type of a raw cell: integers and finite floats become
    /// numbers, blank cells become [`RawValue::Empty`], anything else is text.
    pub fn infer(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if let Ok(value) = trimmed.parse::<i64>() {
            return Self::Int(value);
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Float(value),
            _ => Self::Text(cell.to_string()),
        }
    }

    /// Returns `true` for blank cells and whitespace-only text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Int(_) | Self::Float(_) => false,
        }
    }

    /// Coerces the cell to an integer.
    ///
    /// Floats are truncated toward zero; text yields its leading signed digit
    /// run (`"12 blocks"` is 12). Returns `None` when nothing numeric is found.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Empty => None,
            Self::Int(value) => Some(*value),
            // `as` saturates at the i64 bounds.
            Self::Float(value) => Some(value.trunc() as i64),
            Self::Text(text) => leading_integer(text),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }
    let saturated = if negative { i64::MIN } else { i64::MAX };
    let magnitude = match digits.parse::<i64>() {
        Ok(value) => value,
        Err(_) => return Some(saturated),
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// One row of an import payload: header name → cell, in column order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRecord {
    fields: Vec<(String, RawValue)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field. A later field with the same name shadows nothing; the
    /// first occurrence wins on lookup.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<RawValue>) {
        self.fields.push((field.into(), value.into()));
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Exact-name lookup.
    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, value)| value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First present, non-empty value among `variants`, falling back to any
    /// header equal to a variant ignoring ASCII case.
    fn resolve(&self, variants: &[&str]) -> Option<&RawValue> {
        variants
            .iter()
            .filter_map(|variant| self.get(variant))
            .find(|value| !value.is_empty())
            .or_else(|| {
                self.fields
                    .iter()
                    .filter(|(name, _)| {
                        variants
                            .iter()
                            .any(|variant| name.trim().eq_ignore_ascii_case(variant))
                    })
                    .map(|(_, value)| value)
                    .find(|value| !value.is_empty())
            })
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        }
    }
}

/// A validated row waiting for an id. `held` is not clamped yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryCandidate {
    pub name: String,
    pub required: i64,
    pub held: i64,
}

/// Normalizes a raw record.
///
/// Returns `None` when the required quantity is not strictly positive.
pub fn normalize_record(record: &RawRecord) -> Option<EntryCandidate> {
    let required = record
        .resolve(&REQUIRED_FIELDS)
        .and_then(RawValue::as_integer)
        .unwrap_or(0);
    if required <= 0 {
        return None;
    }

    let held = record
        .resolve(&HELD_FIELDS)
        .and_then(RawValue::as_integer)
        .unwrap_or(0);

    let name = record
        .resolve(&NAME_FIELDS)
        .map(|value| value.to_string().trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_NAME.to_string());

    Some(EntryCandidate {
        name,
        required,
        held,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_types_cells() {
        assert_eq!(RawValue::infer(""), RawValue::Empty);
        assert_eq!(RawValue::infer("  "), RawValue::Empty);
        assert_eq!(RawValue::infer("42"), RawValue::Int(42));
        assert_eq!(RawValue::infer(" -7 "), RawValue::Int(-7));
        assert_eq!(RawValue::infer("3.5"), RawValue::Float(3.5));
        assert_eq!(RawValue::infer("Oak Planks"), RawValue::from("Oak Planks"));
        assert_eq!(RawValue::infer("NaN"), RawValue::from("NaN"));
    }

    #[test]
    fn integer_coercion_is_loose() {
        assert_eq!(RawValue::Float(3.9).as_integer(), Some(3));
        assert_eq!(RawValue::Float(-3.9).as_integer(), Some(-3));
        assert_eq!(RawValue::from("12 blocks").as_integer(), Some(12));
        assert_eq!(RawValue::from("  -4x").as_integer(), Some(-4));
        assert_eq!(RawValue::from("abc").as_integer(), None);
        assert_eq!(RawValue::from("-").as_integer(), None);
        assert_eq!(
            RawValue::from("99999999999999999999").as_integer(),
            Some(i64::MAX)
        );
        assert_eq!(RawValue::Empty.as_integer(), None);
    }

    #[test]
    fn normalize_reads_either_casing() {
        let upper = RawRecord::new()
            .with("Item", "Stone")
            .with("Total", 10)
            .with("Available", 3);
        let lower = RawRecord::new()
            .with("item", "Stone")
            .with("total", 10)
            .with("available", 3);
        let expected = Some(EntryCandidate {
            name: "Stone".to_string(),
            required: 10,
            held: 3,
        });
        assert_eq!(normalize_record(&upper), expected);
        assert_eq!(normalize_record(&lower), expected);
    }

    #[test]
    fn normalize_falls_back_to_any_casing() {
        let record = RawRecord::new()
            .with("ITEM", "Glass")
            .with("TOTAL", 5)
            .with("AVAILABLE", 1);
        let candidate = normalize_record(&record).unwrap();
        assert_eq!(candidate.name, "Glass");
        assert_eq!(candidate.required, 5);
        assert_eq!(candidate.held, 1);
    }

    #[test]
    fn normalize_defaults_missing_fields() {
        let record = RawRecord::new().with("Total", 8);
        let candidate = normalize_record(&record).unwrap();
        assert_eq!(candidate.name, UNKNOWN_NAME);
        assert_eq!(candidate.held, 0);

        let blank_name = RawRecord::new().with("Item", "   ").with("Total", 8);
        assert_eq!(normalize_record(&blank_name).unwrap().name, UNKNOWN_NAME);
    }

    #[test]
    fn normalize_skips_empty_variant() {
        let record = RawRecord::new()
            .with("Total", RawValue::Empty)
            .with("total", 12);
        assert_eq!(normalize_record(&record).unwrap().required, 12);
    }

    #[test]
    fn normalize_drops_non_positive_required() {
        for total in [RawValue::Int(0), RawValue::Int(-3), RawValue::from("none")] {
            let record = RawRecord::new().with("Item", "Dirt").with("Total", total);
            assert_eq!(normalize_record(&record), None);
        }
        assert_eq!(normalize_record(&RawRecord::new()), None);
    }

    #[test]
    fn normalize_does_not_clamp_held() {
        let record = RawRecord::new()
            .with("Item", "Sand")
            .with("Total", 4)
            .with("Available", "900");
        assert_eq!(normalize_record(&record).unwrap().held, 900);
    }

    #[test]
    fn numeric_name_is_kept_as_text() {
        let record = RawRecord::new().with("Item", 42).with("Total", 1);
        assert_eq!(normalize_record(&record).unwrap().name, "42");
    }
}
