//! Cell colours.
//!
//! Front ends hand colours over as strings (`"#1e90ff"`, `"white"`); the
//! core works with [`Rgba8`] values parsed once at the boundary.

use core::fmt;
use core::str::FromStr;

use crate::error::GridError;

// ============================================================================
// Rgba8 (8-bit per channel)
// ============================================================================

/// RGBA colour with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);
    pub const BLACK: Rgba8 = Rgba8::new(0, 0, 0, 255);
    pub const RED: Rgba8 = Rgba8::new(255, 0, 0, 255);
    pub const GREEN: Rgba8 = Rgba8::new(0, 128, 0, 255);
    pub const BLUE: Rgba8 = Rgba8::new(0, 0, 255, 255);

    /// Colour of an unpainted cell; also the "erase" colour.
    pub const BACKGROUND: Rgba8 = Rgba8::WHITE;
    /// Marker for the first point of a selection.
    pub const SELECTION_FIRST: Rgba8 = Rgba8::RED;
    /// Marker for every later point of a selection.
    pub const SELECTION_REST: Rgba8 = Rgba8::BLUE;

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour.
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn is_background(&self) -> bool {
        *self == Self::BACKGROUND
    }

    /// `[r, g, b, a]` byte order, as an HTML canvas `ImageData` expects.
    pub fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    fn from_named(name: &str) -> Option<Self> {
        let c = match name {
            "white" => Self::WHITE,
            "black" => Self::BLACK,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "blue" => Self::BLUE,
            "yellow" => Self::new_rgb(255, 255, 0),
            "cyan" | "aqua" => Self::new_rgb(0, 255, 255),
            "magenta" | "fuchsia" => Self::new_rgb(255, 0, 255),
            "gray" | "grey" => Self::new_rgb(128, 128, 128),
            "orange" => Self::new_rgb(255, 165, 0),
            "purple" => Self::new_rgb(128, 0, 128),
            _ => return None,
        };
        Some(c)
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 => {
                let v = u16::from_str_radix(hex, 16).ok()?;
                let expand = |n: u16| ((n & 0xF) as u8) * 17;
                Some(Self::new_rgb(expand(v >> 8), expand(v >> 4), expand(v)))
            }
            6 => u32::from_str_radix(hex, 16).ok().map(rgb8_packed),
            _ => None,
        }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::BACKGROUND
    }
}

impl FromStr for Rgba8 {
    type Err = GridError;

    /// Parse `#rrggbb`, `#rgb`, or a basic CSS colour name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed.strip_prefix('#') {
            Some(hex) => Self::from_hex(hex),
            None => Self::from_named(&trimmed.to_ascii_lowercase()),
        };
        parsed.ok_or_else(|| GridError::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Create an Rgba8 from a packed RGB value (0xRRGGBB).
pub fn rgb8_packed(v: u32) -> Rgba8 {
    Rgba8::new(
        ((v >> 16) & 0xFF) as u8,
        ((v >> 8) & 0xFF) as u8,
        (v & 0xFF) as u8,
        255,
    )
}

// ============================================================================
// Tests
// ============================================================================
