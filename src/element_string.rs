//! Sequential GS1 element-string tokenizer.
//!
//! Unlike the per-field patterns used by default, this walks the payload from
//! the start, one Application Identifier at a time, honoring each AI's data
//! length:
//!
//! ```text
//! ]d2 <GS> 01 09506000134352 17 260831 10 ABC123 <GS> 21 SN0001
//! |        |  fixed 14       |  fixed 6 |  var, ends at GS | var, ends at end
//! symbology identifier (optional), then FNC1
//! ```
//!
//! Only the AIs that show up on pharmaceutical packs are known. An unknown AI
//! stops tokenizing because its length, and so the start of the next
//! element, cannot be determined.

use tracing::trace;

use crate::error::{Error, Result};

/// ASCII Group Separator, the in-data form of FNC1.
pub const GROUP_SEPARATOR: char = '\u{1d}';

/// Symbology identifiers a scanner may prepend to GS1 data.
const SYMBOLOGY_IDS: &[&str] = &["]d2", "]C1", "]Q3", "]e0"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataLength {
    /// Exactly this many characters; no separator needed afterwards.
    Fixed(usize),
    /// Up to this many characters, terminated by GS or end of input.
    Variable(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiDefinition {
    pub ai: &'static str,
    pub title: &'static str,
    pub length: DataLength,
    pub numeric: bool,
}

const fn fixed(ai: &'static str, title: &'static str, len: usize) -> AiDefinition {
    AiDefinition { ai, title, length: DataLength::Fixed(len), numeric: true }
}

const fn variable(ai: &'static str, title: &'static str, max: usize, numeric: bool) -> AiDefinition {
    AiDefinition { ai, title, length: DataLength::Variable(max), numeric }
}

const AI_TABLE: &[AiDefinition] = &[
    fixed("00", "SSCC", 18),
    fixed("01", "GTIN", 14),
    fixed("02", "CONTENT", 14),
    variable("10", "BATCH/LOT", 20, false),
    fixed("11", "PROD DATE", 6),
    fixed("12", "DUE DATE", 6),
    fixed("13", "PACK DATE", 6),
    fixed("15", "BEST BEFORE", 6),
    fixed("16", "SELL BY", 6),
    fixed("17", "USE BY", 6),
    fixed("20", "VARIANT", 2),
    variable("21", "SERIAL", 20, false),
    variable("22", "CPV", 20, false),
    variable("30", "VAR. COUNT", 8, true),
    variable("37", "COUNT", 8, true),
    variable("240", "ADDITIONAL ID", 30, false),
    variable("241", "CUST. PART No.", 30, false),
    variable("710", "NHRN PZN", 20, false),
    variable("711", "NHRN CIP", 20, false),
    variable("712", "NHRN CN", 20, false),
    variable("713", "NHRN DRN", 20, false),
    variable("714", "NHRN AIM", 20, false),
];

/// Find the AI that `text` starts with, preferring the longest identifier.
pub fn lookup_ai(text: &str) -> Option<&'static AiDefinition> {
    AI_TABLE.iter().filter(|def| text.starts_with(def.ai)).max_by_key(|def| def.ai.len())
}

/// One AI and its data. `start..end` is the byte span of identifier plus
/// value in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub ai: &'static str,
    pub title: &'static str,
    pub value: String,
    pub start: usize,
    pub end: usize,
}

/// Tokenize a complete GS1 element string.
///
/// ```
/// let elements = medscan::parse_element_strings("\u{1d}010950600013435217260831").unwrap();
/// assert_eq!(elements[0].value, "09506000134352");
/// assert_eq!(elements[1].ai, "17");
/// ```
pub fn parse_element_strings(text: &str) -> Result<Vec<Element>> {
    match scan(text) {
        (elements, None) => Ok(elements),
        (_, Some(err)) => Err(err),
    }
}

/// Tokenize as far as possible, returning the elements read before the first
/// error along with that error.
pub(crate) fn scan(text: &str) -> (Vec<Element>, Option<Error>) {
    let mut elements = Vec::new();
    let mut pos = SYMBOLOGY_IDS.iter().find(|id| text.starts_with(**id)).map_or(0, |id| id.len());

    loop {
        while text[pos..].starts_with(GROUP_SEPARATOR) {
            pos += GROUP_SEPARATOR.len_utf8();
        }
        if pos >= text.len() {
            break;
        }

        match read_element(text, pos) {
            Ok(element) => {
                trace!(ai = element.ai, title = element.title, value = %element.value, "element");
                pos = element.end;
                elements.push(element);
            }
            Err(err) => return (elements, Some(err)),
        }
    }

    (elements, None)
}

fn read_element(text: &str, start: usize) -> Result<Element> {
    let rest = &text[start..];
    let def = lookup_ai(rest)
        .ok_or_else(|| Error::UnknownAi { offset: start, found: rest.chars().take(4).collect() })?;

    let data_start = start + def.ai.len();
    let data = &text[data_start..];
    let field = &data[..data.find(GROUP_SEPARATOR).unwrap_or(data.len())];

    let value = match def.length {
        DataLength::Fixed(len) => {
            let end = field.char_indices().nth(len).map_or(field.len(), |(i, _)| i);
            let value = &field[..end];
            let found = value.chars().count();
            if found < len {
                return Err(Error::Truncated { ai: def.ai, expected: len, found });
            }
            value
        }
        DataLength::Variable(max) => {
            let found = field.chars().count();
            if found == 0 {
                return Err(Error::EmptyValue { ai: def.ai });
            }
            if found > max {
                return Err(Error::ValueTooLong { ai: def.ai, max, found });
            }
            field
        }
    };

    if def.numeric && !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::NotNumeric { ai: def.ai, value: value.to_string() });
    }

    Ok(Element { ai: def.ai, title: def.title, value: value.to_string(), start, end: data_start + value.len() })
}
