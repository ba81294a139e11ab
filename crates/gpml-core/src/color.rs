//! Colour values for pathway graphics.
//!
//! GPML stores colours as bare hex strings (`"ff0000"`, `"ff000080"`), as
//! `"Transparent"`, or (in older files) as CSS-like names such as `"Black"`.
//! [`Color`] accepts all of these, using the CSS parser from the `color`
//! crate, and normalises the value to 8-bit sRGBA so that equality is exact.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};

/// An 8-bit sRGBA colour.
///
/// Fully transparent colours are normalised to `(0, 0, 0, 0)`, which is the
/// only value GPML can express for them.
///
/// # Examples
///
/// ```
/// use gpml_core::color::Color;
///
/// let red = Color::new("ff0000").unwrap();
/// assert_eq!(red, Color::new("#FF0000").unwrap());
/// assert_eq!(red.to_gpml_hex(), "ff0000");
///
/// let none = Color::new("Transparent").unwrap();
/// assert!(none.is_transparent());
/// assert_eq!(none.to_gpml_hex(), "Transparent");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    pub const BLACK: Color = Color::from_rgba8(0, 0, 0, 255);
    pub const WHITE: Color = Color::from_rgba8(255, 255, 255, 255);
    pub const TRANSPARENT: Color = Color::from_rgba8(0, 0, 0, 0);

    /// Parses a GPML or CSS colour string.
    ///
    /// Bare six or eight digit hex strings are accepted without a leading `#`.
    /// Named colours are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when the string is not a colour.
    pub fn new(color_str: &str) -> Result<Self, String> {
        let trimmed = color_str.trim();
        let lowered = trimmed.to_ascii_lowercase();
        let candidate = if is_bare_hex(&lowered) {
            format!("#{lowered}")
        } else {
            lowered
        };

        match DynamicColor::from_str(&candidate) {
            Ok(color) => {
                let rgba = color.to_alpha_color::<Srgb>().to_rgba8();
                Ok(Self::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a))
            }
            Err(err) => Err(format!("invalid color `{trimmed}`: {err}")),
        }
    }

    /// Creates a colour from its components.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        if a == 0 {
            Self {
                r: 0,
                g: 0,
                b: 0,
                a: 0,
            }
        } else {
            Self { r, g, b, a }
        }
    }

    pub fn red(self) -> u8 {
        self.r
    }

    pub fn green(self) -> u8 {
        self.g
    }

    pub fn blue(self) -> u8 {
        self.b
    }

    /// Returns the alpha component, `255` being opaque.
    pub fn alpha(self) -> u8 {
        self.a
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Returns the string form GPML writes for this colour.
    ///
    /// Opaque colours are `rrggbb`, translucent ones `rrggbbaa` and fully
    /// transparent ones the keyword `Transparent`.
    pub fn to_gpml_hex(self) -> String {
        match self.a {
            0 => "Transparent".to_string(),
            255 => format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b),
            a => format!("{:02x}{:02x}{:02x}{a:02x}", self.r, self.g, self.b),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_gpml_hex())
    }
}

fn is_bare_hex(s: &str) -> bool {
    matches!(s.len(), 6 | 8) && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_hex() {
        let color = Color::new("3366cc").unwrap();
        assert_eq!((color.red(), color.green(), color.blue()), (0x33, 0x66, 0xcc));
        assert_eq!(color.alpha(), 255);
    }

    #[test]
    fn test_parse_hex_with_alpha() {
        let color = Color::new("ff000080").unwrap();
        assert_eq!(color.alpha(), 0x80);
        assert_eq!(color.to_gpml_hex(), "ff000080");
    }

    #[test]
    fn test_parse_legacy_names() {
        assert_eq!(Color::new("Black").unwrap(), Color::BLACK);
        assert_eq!(Color::new("White").unwrap(), Color::WHITE);
        assert_eq!(Color::new("Transparent").unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn test_transparent_is_normalised() {
        let color = Color::from_rgba8(12, 34, 56, 0);
        assert_eq!(color, Color::TRANSPARENT);
    }

    #[test]
    fn test_invalid_color() {
        assert!(Color::new("not-a-color").is_err());
        assert!(Color::new("").is_err());
    }

    #[test]
    fn test_hex_round_trip() {
        for value in ["000000", "ffffff", "99ccff", "Transparent"] {
            let color = Color::new(value).unwrap();
            assert_eq!(color.to_gpml_hex(), value);
        }
    }
}
