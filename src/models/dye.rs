use dye_color::{Lab, Srgb, Swatch};
use serde::{Deserialize, Serialize};

/// Synthetic ids live in `-(2 * SYNTHETIC_ID_BASE) < id <= -SYNTHETIC_ID_BASE`.
/// Supplied ids in that range are rejected.
pub const SYNTHETIC_ID_BASE: i64 = 1_000_000_000;

/// 8-bit RGB triple as supplied by catalog data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for Srgb {
    fn from(rgb: Rgb) -> Self {
        Srgb::new(rgb.r, rgb.g, rgb.b)
    }
}

impl From<Srgb> for Rgb {
    fn from(srgb: Srgb) -> Self {
        Rgb::new(srgb.r, srgb.g, srgb.b)
    }
}

/// HSV triple: hue in degrees [0, 360], saturation and value in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}

/// A named catalog color.
///
/// Immutable once loaded: the catalog hands out `Arc<Dye>` and never
/// mutates an entry after publishing it. RGB, HSV and hex are kept exactly
/// as supplied; only the perceptual coordinates are derived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dye {
    /// Unique within a loaded catalog. Negative ids are synthetic.
    #[serde(rename = "itemID")]
    pub id: i64,

    /// Secondary id for interop with other tools
    #[serde(rename = "stainID")]
    pub external_id: Option<i64>,

    pub name: String,

    /// Empty when the record had no category
    pub category: String,

    /// `#RRGGBB`
    pub hex: Option<String>,

    pub rgb: Option<Rgb>,

    pub hsv: Option<Hsv>,

    pub cost: f64,

    #[serde(skip)]
    pub(crate) name_lower: String,

    #[serde(skip)]
    pub(crate) category_lower: String,

    #[serde(skip)]
    pub(crate) swatch: Option<Swatch>,
}

impl Dye {
    /// CIELAB coordinates of the swatch.
    ///
    /// Neutral grey when the record carried neither RGB nor hex.
    pub fn lab(&self) -> Lab {
        self.swatch.map_or(Lab::NEUTRAL_GRAY, |s| s.lab())
    }

    /// The color used for matching (RGB, or hex when RGB was absent).
    ///
    /// `None` when the record had no color data at all; such an entry can
    /// be looked up by id but never scores as a match.
    pub fn swatch(&self) -> Option<&Swatch> {
        self.swatch.as_ref()
    }

    /// Lowercased name, for case-insensitive search.
    pub fn name_lower(&self) -> &str {
        &self.name_lower
    }

    /// Lowercased category, for case-insensitive filtering.
    pub fn category_lower(&self) -> &str {
        &self.category_lower
    }

    /// True when the id was synthesized rather than supplied.
    pub fn has_synthetic_id(&self) -> bool {
        self.id <= -SYNTHETIC_ID_BASE
    }
}
