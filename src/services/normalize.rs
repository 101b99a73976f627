//! Turns one raw catalog record into a validated [`Dye`].
//!
//! Field aliases: `itemID` is canonical with legacy `id` as fallback, and
//! `cost` is canonical with `price` as fallback. A null field counts as
//! absent. Colors are stored as supplied; only the matching swatch and
//! CIELAB coordinates are derived.

use dye_color::{Srgb, Swatch};
use regex::Regex;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::sync::OnceLock;

use crate::error::RecordError;
use crate::models::{CatalogConfig, Dye, Hsv, Rgb};

pub use crate::models::dye::SYNTHETIC_ID_BASE;

fn hex_pattern() -> &'static Regex {
    static HEX: OnceLock<Regex> = OnceLock::new();
    HEX.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex pattern is valid"))
}

/// True for a strict `#RRGGBB` string.
pub fn is_valid_hex(hex: &str) -> bool {
    hex_pattern().is_match(hex)
}

/// Deterministic negative id derived from a dye name.
///
/// The first eight bytes of the name's SHA-256 digest, reduced modulo
/// `SYNTHETIC_ID_BASE` and offset below `-SYNTHETIC_ID_BASE`, so the result
/// never collides with a real (positive) id.
pub fn synthetic_id(name: &str) -> i64 {
    let digest = Sha256::digest(name.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);

    let offset = (u64::from_be_bytes(prefix) % SYNTHETIC_ID_BASE as u64) as i64;
    -(SYNTHETIC_ID_BASE + offset)
}

/// Validate and normalize a sanitized record.
pub fn normalize_record(raw: &Value, config: &CatalogConfig) -> Result<Dye, RecordError> {
    let record = raw.as_object().ok_or(RecordError::NotAnObject)?;

    let name = match field(record, "name") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => return Err(RecordError::MissingName),
    };

    let category = match field(record, "category") {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(RecordError::InvalidCategory),
    };

    let id = match field(record, "itemID").or_else(|| field(record, "id")) {
        Some(value) => match as_integer(value) {
            Some(id) if id > -SYNTHETIC_ID_BASE => id,
            _ => return Err(RecordError::InvalidId(value.to_string())),
        },
        None if config.is_non_colorable(&category) => synthetic_id(&name),
        None => return Err(RecordError::MissingId),
    };

    let external_id = field(record, "stainID").and_then(as_integer);

    let cost = match field(record, "cost").or_else(|| field(record, "price")) {
        None => 0.0,
        Some(Value::Number(n)) => n.as_f64().ok_or(RecordError::InvalidCost)?,
        Some(_) => return Err(RecordError::InvalidCost),
    };

    let hex = match field(record, "hex") {
        None => None,
        Some(Value::String(s)) if is_valid_hex(s) => Some(s.clone()),
        Some(other) => return Err(RecordError::InvalidHex(display_value(other))),
    };

    let rgb = field(record, "rgb").map(parse_rgb).transpose()?;
    let hsv = field(record, "hsv").map(parse_hsv).transpose()?;

    let swatch = rgb
        .map(Srgb::from)
        .or_else(|| hex.as_deref().and_then(|h| h.parse::<Srgb>().ok()))
        .map(Swatch::new);

    Ok(Dye {
        id,
        external_id,
        name_lower: name.to_lowercase(),
        name,
        category_lower: category.to_lowercase(),
        category,
        hex,
        rgb,
        hsv,
        cost,
        swatch,
    })
}

/// A present, non-null field.
fn field<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| !v.is_null())
}

/// Integer value, accepting whole floats such as `5729.0`.
fn as_integer(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_rgb(value: &Value) -> Result<Rgb, RecordError> {
    let invalid = || RecordError::InvalidRgb(value.to_string());
    let obj = value.as_object().ok_or_else(invalid)?;

    let channel = |key: &str| -> Result<u8, RecordError> {
        obj.get(key)
            .and_then(as_integer)
            .and_then(|c| u8::try_from(c).ok())
            .ok_or_else(invalid)
    };

    Ok(Rgb::new(channel("r")?, channel("g")?, channel("b")?))
}

fn parse_hsv(value: &Value) -> Result<Hsv, RecordError> {
    let invalid = || RecordError::InvalidHsv(value.to_string());
    let obj = value.as_object().ok_or_else(invalid)?;

    let component = |key: &str, max: f64| -> Result<f64, RecordError> {
        obj.get(key)
            .and_then(Value::as_f64)
            .filter(|c| (0.0..=max).contains(c))
            .ok_or_else(invalid)
    };

    Ok(Hsv::new(
        component("h", 360.0)?,
        component("s", 100.0)?,
        component("v", 100.0)?,
    ))
}
