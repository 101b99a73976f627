//! Test fixtures and constants.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

/// Item ids used by the primaries fixture
pub mod ids {
    pub const SNOW_WHITE: i64 = 1;
    pub const JET_BLACK: i64 = 2;
    pub const RUBY_RED: i64 = 3;
}

/// Three maximally separated colors.
pub fn primaries() -> Value {
    json!([
        {"itemID": ids::SNOW_WHITE, "name": "Snow White", "hex": "#FFFFFF", "category": "White"},
        {"itemID": ids::JET_BLACK, "name": "Jet Black", "hex": "#000000", "category": "Black"},
        {"itemID": ids::RUBY_RED, "name": "Ruby Red", "hex": "#FF0000", "category": "Red"},
    ])
}

/// One colorable dye and one Facewear entry with the same color.
pub fn facewear_twin() -> Value {
    json!([
        {"name": "Eyepatch", "hex": "#781A1A", "category": "Facewear"},
        {"itemID": 5740, "name": "Dalamud Red", "hex": "#781A1A", "category": "Red"},
    ])
}

/// A small realistic catalog keyed by item id, with every color distinct.
///
/// Uses both canonical and legacy field names and includes two Facewear
/// entries without ids.
pub fn sample_catalog() -> Value {
    json!({
        "5729": {"itemID": 5729, "stainID": 1, "name": "Snow White", "category": "White",
                 "hex": "#E4DFD0", "rgb": {"r": 228, "g": 223, "b": 208},
                 "hsv": {"h": 45, "s": 8.8, "v": 89.4}, "cost": 216},
        "5730": {"itemID": 5730, "stainID": 2, "name": "Ash Grey", "category": "White",
                 "hex": "#ACA8A2", "rgb": {"r": 172, "g": 168, "b": 162},
                 "hsv": {"h": 36, "s": 5.8, "v": 67.5}, "cost": 216},
        "5732": {"id": 5732, "stainID": 5, "name": "Soot Black", "category": "Black",
                 "hex": "#28211C", "rgb": {"r": 40, "g": 33, "b": 28},
                 "hsv": {"h": 25, "s": 30, "v": 15.7}, "price": 216},
        "5734": {"itemID": 5734, "stainID": 6, "name": "Rose Pink", "category": "Red",
                 "hex": "#E69A9A", "rgb": {"r": 230, "g": 154, "b": 154},
                 "hsv": {"h": 0, "s": 33, "v": 90.2}, "cost": 216},
        "5740": {"itemID": 5740, "stainID": 10, "name": "Dalamud Red", "category": "Red",
                 "hex": "#781A1A", "rgb": {"r": 120, "g": 26, "b": 26},
                 "hsv": {"h": 0, "s": 78.3, "v": 47.1}, "cost": 216},
        "5742": {"itemID": 5742, "stainID": 11, "name": "Rust Red", "category": "Red",
                 "hex": "#621010", "rgb": {"r": 98, "g": 16, "b": 16},
                 "hsv": {"h": 0, "s": 83.7, "v": 38.4}, "cost": 216},
        "5765": {"itemID": 5765, "stainID": 24, "name": "Canary Yellow", "category": "Yellow",
                 "hex": "#E2D36A", "rgb": {"r": 226, "g": 211, "b": 106},
                 "hsv": {"h": 52.5, "s": 53.1, "v": 88.6}, "cost": 216},
        "5770": {"itemID": 5770, "stainID": 30, "name": "Celeste Green", "category": "Green",
                 "hex": "#96BDB9", "rgb": {"r": 150, "g": 189, "b": 185},
                 "hsv": {"h": 174, "s": 20.6, "v": 74.1}, "cost": 216},
        "5777": {"itemID": 5777, "stainID": 36, "name": "Hunter Green", "category": "Green",
                 "hex": "#1C3D1C", "rgb": {"r": 28, "g": 61, "b": 28},
                 "hsv": {"h": 120, "s": 54.1, "v": 23.9}, "cost": 216},
        "5786": {"itemID": 5786, "stainID": 45, "name": "Royal Blue", "category": "Blue",
                 "hex": "#334EBA", "rgb": {"r": 51, "g": 78, "b": 186},
                 "hsv": {"h": 228, "s": 72.6, "v": 72.9}, "cost": 216},
        "5795": {"itemID": 5795, "stainID": 54, "name": "Royal Purple", "category": "Purple",
                 "hex": "#66304E", "rgb": {"r": 102, "g": 48, "b": 78},
                 "hsv": {"h": 326.7, "s": 52.9, "v": 40}, "cost": 216},
        "13114": {"itemID": 13114, "stainID": 82, "name": "Pure White", "category": "Special",
                  "hex": "#F9F8F4", "rgb": {"r": 249, "g": 248, "b": 244},
                  "hsv": {"h": 48, "s": 2, "v": 97.6}, "cost": 0},
        "eyepatch": {"name": "Eyepatch", "category": "Facewear", "hex": "#E4DFD0"},
        "goggles": {"name": "Crimson Goggles", "category": "Facewear", "hex": "#7A1B1B"}
    })
}

/// Ids in `sample_catalog` that are colorable
pub const SAMPLE_COLORABLE_IDS: [i64; 12] = [
    5729, 5730, 5732, 5734, 5740, 5742, 5765, 5770, 5777, 5786, 5795, 13114,
];

/// `n` random dyes with ids `1..=n`; every tenth is Facewear.
pub fn random_catalog(seed: u64, n: usize) -> Value {
    let mut rng = StdRng::seed_from_u64(seed);
    let records: Vec<Value> = (1..=n)
        .map(|id| {
            let (r, g, b): (u8, u8, u8) = (rng.gen(), rng.gen(), rng.gen());
            let category = if id % 10 == 0 { "Facewear" } else { "Random" };
            json!({
                "itemID": id,
                "name": format!("Random {id}"),
                "category": category,
                "hex": format!("#{r:02X}{g:02X}{b:02X}"),
                "rgb": {"r": r, "g": g, "b": b},
            })
        })
        .collect();
    Value::Array(records)
}

/// Random `#RRGGBB` query colors.
pub fn random_targets(seed: u64, n: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let (r, g, b): (u8, u8, u8) = (rng.gen(), rng.gen(), rng.gen());
            format!("#{r:02X}{g:02X}{b:02X}")
        })
        .collect()
}
