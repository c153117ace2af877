use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::{DrawResult, GameType, RawRecord};
use crate::utils::{canonical_draw_date, date_part};

pub const DEFAULT_MULTIPLIER: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Numbers,
    Special,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Date => "date",
            Field::Numbers => "numbers",
            Field::Special => "special",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Discard {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("missing {0}")]
    Missing(Field),

    #[error("empty {0}")]
    Empty(Field),

    #[error("invalid {field}: {value}")]
    Invalid { field: Field, value: String },
}

fn invalid(field: Field, value: impl Into<String>) -> Discard {
    Discard::Invalid {
        field,
        value: value.into(),
    }
}

/// Accepted keys per logical field, highest priority first.
#[derive(Debug)]
pub struct FieldAliases {
    pub date: &'static [&'static str],
    pub numbers: &'static [&'static str],
    pub special: &'static [&'static str],
    pub multiplier: &'static [&'static str],
}

const SOCRATA_ALIASES: FieldAliases = FieldAliases {
    date: &["draw_date", "date"],
    numbers: &["winning_numbers", "numbers"],
    special: &["powerball", "special"],
    multiplier: &["power_play", "multiplier"],
};

const COMPACT_ALIASES: FieldAliases = FieldAliases {
    date: &["d", "date"],
    numbers: &["w", "numbers"],
    special: &["s", "special"],
    multiplier: &["m", "multiplier"],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSchema {
    Socrata,
    Compact,
}

impl SourceSchema {
    pub fn aliases(self) -> &'static FieldAliases {
        match self {
            SourceSchema::Socrata => &SOCRATA_ALIASES,
            SourceSchema::Compact => &COMPACT_ALIASES,
        }
    }

    pub fn normalize(self, raw: &RawRecord) -> Result<DrawResult, Discard> {
        let record = raw.as_object().ok_or(Discard::NotAnObject)?;
        let aliases = self.aliases();

        let date = extract_date(lookup(record, aliases.date))?;
        let numbers = extract_numbers(lookup(record, aliases.numbers))?;
        let special = extract_special(lookup(record, aliases.special))?;
        let multiplier = extract_multiplier(lookup(record, aliases.multiplier));

        Ok(DrawResult {
            date,
            numbers,
            special,
            multiplier,
            game_type: GameType::Powerball,
        })
    }

    pub fn normalize_all(self, records: &[RawRecord]) -> NormalizedBatch {
        let mut batch = NormalizedBatch::default();
        for raw in records {
            match self.normalize(raw) {
                Ok(draw) => batch.kept.push(draw),
                Err(reason) => batch.discarded.push(reason),
            }
        }
        batch
    }
}

#[derive(Debug, Default)]
pub struct NormalizedBatch {
    pub kept: Vec<DrawResult>,
    pub discarded: Vec<Discard>,
}

fn lookup<'a>(record: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !value.is_null())
}

fn as_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn extract_date(value: Option<&Value>) -> Result<String, Discard> {
    let value = value.ok_or(Discard::Missing(Field::Date))?;
    let text = value
        .as_str()
        .ok_or_else(|| invalid(Field::Date, value.to_string()))?;

    let date = date_part(text);
    if date.is_empty() {
        return Err(Discard::Empty(Field::Date));
    }
    canonical_draw_date(date).ok_or_else(|| invalid(Field::Date, date))
}

fn extract_numbers(value: Option<&Value>) -> Result<Vec<u32>, Discard> {
    let value = value.ok_or(Discard::Missing(Field::Numbers))?;

    let numbers = match value {
        Value::String(text) => text
            .split_whitespace()
            .map(|token| token.parse().map_err(|_| invalid(Field::Numbers, token)))
            .collect::<Result<Vec<u32>, _>>()?,
        Value::Array(items) => items
            .iter()
            .map(|item| as_u32(item).ok_or_else(|| invalid(Field::Numbers, item.to_string())))
            .collect::<Result<Vec<u32>, _>>()?,
        other => return Err(invalid(Field::Numbers, other.to_string())),
    };

    if numbers.is_empty() {
        return Err(Discard::Empty(Field::Numbers));
    }
    Ok(numbers)
}

fn extract_special(value: Option<&Value>) -> Result<u32, Discard> {
    let value = value.ok_or(Discard::Missing(Field::Special))?;
    as_u32(value).ok_or_else(|| invalid(Field::Special, value.to_string()))
}

/// Never fails: anything unusable becomes [`DEFAULT_MULTIPLIER`].
fn extract_multiplier(value: Option<&Value>) -> u32 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(text)) => parse_multiplier_text(text),
        _ => None,
    };
    parsed.filter(|m| *m > 0).unwrap_or(DEFAULT_MULTIPLIER)
}

// "2x", "3 X", " 4 " all parse; a bare "x" does not.
fn parse_multiplier_text(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    let stripped = trimmed
        .strip_suffix(|c: char| c == 'x' || c == 'X')
        .unwrap_or(trimmed);
    stripped.trim().parse().ok()
}
