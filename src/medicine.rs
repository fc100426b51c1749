//! The decoded record and its per-field presence type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::expiry::Expiry;
use crate::gtin::gtin_check_digit_valid;
use crate::{FieldKind, FieldValue, Hit};

/// Outcome of looking up one field in a payload.
///
/// Serializes as the bare value when found and as `null` when absent, so the
/// JSON record reads `{"PC": "...", "SN": null, ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field<T> {
    Found(T),
    Absent,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> Field<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Field::Found(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Field::Found(value) => Some(value),
            Field::Absent => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Found(value),
            None => Field::Absent,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Found(value) => serializer.serialize_some(value),
            Field::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Field::from)
    }
}

/// Fields decoded from one medicine pack payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicineData {
    /// Product code (GTIN), AI (01).
    #[serde(rename = "PC")]
    pub pc: Field<String>,
    /// Serial number, AI (21).
    #[serde(rename = "SN")]
    pub sn: Field<String>,
    /// Batch/lot number, AI (10).
    #[serde(rename = "LOT")]
    pub lot: Field<String>,
    /// Raw expiration year and month, AI (17).
    #[serde(rename = "EXP")]
    pub exp: Field<Expiry>,
}

impl MedicineData {
    /// Assemble a record from extraction hits. The first hit for a field wins.
    pub(crate) fn from_hits(hits: &[Hit]) -> Self {
        let mut data = MedicineData::default();
        for hit in hits {
            match (hit.field, &hit.value) {
                (FieldKind::ProductCode, FieldValue::Text(text)) if data.pc.is_absent() => {
                    data.pc = Field::Found(text.clone());
                }
                (FieldKind::SerialNumber, FieldValue::Text(text)) if data.sn.is_absent() => {
                    data.sn = Field::Found(text.clone());
                }
                (FieldKind::Lot, FieldValue::Text(text)) if data.lot.is_absent() => {
                    data.lot = Field::Found(text.clone());
                }
                (FieldKind::Expiration, FieldValue::Expiry(exp)) if data.exp.is_absent() => {
                    data.exp = Field::Found(exp.clone());
                }
                _ => {}
            }
        }
        data
    }

    /// True when no field was found at all.
    pub fn is_empty(&self) -> bool {
        self.pc.is_absent() && self.sn.is_absent() && self.lot.is_absent() && self.exp.is_absent()
    }

    /// True when the product code is present and carries a valid GTIN-14
    /// check digit.
    pub fn product_code_is_valid(&self) -> bool {
        self.pc.as_option().is_some_and(|pc| gtin_check_digit_valid(pc))
    }
}
