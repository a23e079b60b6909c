//! Cluster colors and the palette they are drawn from

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An RGBA color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    pub const YELLOW: Color = Color::rgb(253, 249, 0);
    pub const ORANGE: Color = Color::rgb(255, 161, 0);
    pub const VIOLET: Color = Color::rgb(135, 60, 190);
    pub const BROWN: Color = Color::rgb(127, 106, 79);
    pub const LIGHT_GRAY: Color = Color::rgb(200, 200, 200);
    pub const PINK: Color = Color::rgb(255, 109, 194);
    pub const GOLD: Color = Color::rgb(255, 203, 0);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const DARK_GREEN: Color = Color::rgb(0, 117, 44);
    pub const DARK_PURPLE: Color = Color::rgb(112, 31, 126);
    pub const LIME: Color = Color::rgb(0, 158, 47);
    pub const DARK_BLUE: Color = Color::rgb(0, 82, 172);
    pub const DARK_BROWN: Color = Color::rgb(76, 63, 47);
    pub const DARK_GRAY: Color = Color::rgb(80, 80, 80);
    pub const MAROON: Color = Color::rgb(190, 33, 55);
    pub const PURPLE: Color = Color::rgb(200, 122, 255);
    pub const OFF_WHITE: Color = Color::rgb(245, 245, 245);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create a color from all four channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Return the same color with alpha set from a `[0, 1]` fraction
    ///
    /// The byte is truncated, so `0.9` maps to 229.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0) as u8,
            ..self
        }
    }

    /// Channels as normalized floats, for renderers that want `[f32; 4]`
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Ordered set of colors assigned to centroid slots by index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PaletteData")]
pub struct Palette {
    colors: Vec<Color>,
}

#[derive(Deserialize)]
struct PaletteData {
    colors: Vec<Color>,
}

impl TryFrom<PaletteData> for Palette {
    type Error = Error;

    fn try_from(data: PaletteData) -> Result<Self> {
        Self::new(data.colors)
    }
}

impl Palette {
    /// Create a palette from an explicit color list
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::InvalidParameter("palette must contain at least one color".to_string()));
        }
        Ok(Self { colors })
    }

    /// The default cluster palette with every entry at the given alpha
    pub fn with_alpha(alpha: f32) -> Self {
        let mut palette = Self::default();
        for color in &mut palette.colors {
            *color = color.with_alpha(alpha);
        }
        palette
    }

    /// Color for slot `index`, cycling through the palette
    pub fn color_for(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                Color::RED,
                Color::GREEN,
                Color::BLUE,
                Color::YELLOW,
                Color::ORANGE,
                Color::VIOLET,
                Color::BROWN,
                Color::LIGHT_GRAY,
                Color::PINK,
                Color::GOLD,
                Color::MAGENTA,
                Color::DARK_GREEN,
                Color::DARK_PURPLE,
                Color::LIME,
                Color::BROWN,
                Color::DARK_BLUE,
                Color::DARK_BROWN,
                Color::DARK_GRAY,
                Color::MAROON,
                Color::PURPLE,
                Color::OFF_WHITE,
            ],
        }
    }
}
