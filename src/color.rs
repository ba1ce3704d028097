// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// or from a "#RRGGBB" / "#RRGGBBAA" token

use crate::error::FieldError;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

// Violet, cyan, lavender, blue and medium purple
pub const DEFAULT_PALETTE: [Color; 5] = [
    Color::rgb(0x6a, 0x00, 0xff),
    Color::rgb(0x00, 0xff, 0xff),
    Color::rgb(0x8b, 0x5c, 0xf6),
    Color::rgb(0x3b, 0x82, 0xf6),
    Color::rgb(0x93, 0x70, 0xdb),
];

// Painted translucently over the whole surface each frame to leave trails
pub const BACKGROUND: Color = Color::rgb(11, 0, 24);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    pub fn from_hex(token: &str) -> Result<Color, FieldError> {
        let digits = token.trim().trim_start_matches('#');
        let bad = || FieldError::invalid(format!("unrecognised color {:?}", token));
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let num = u32::from_str_radix(digits, 16).map_err(|_| bad())?;
        match digits.len() {
            6 => Ok(Color::from_u32((num << 8) | 0xff)),
            8 => Ok(Color::from_u32(num)),
            _ => Err(bad()),
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.a as f64 / 255.0
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

pub fn parse_palette<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Color>, FieldError> {
    tokens.iter().map(|t| Color::from_hex(t.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_palette_tokens() {
        assert_eq!(Color::from_hex("#6A00FF").unwrap(), DEFAULT_PALETTE[0]);
        assert_eq!(Color::from_hex("00ffff").unwrap(), DEFAULT_PALETTE[1]);
        assert_eq!(
            Color::from_hex("#0B001880").unwrap(),
            Color { r: 11, g: 0, b: 24, a: 0x80 }
        );
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
        assert!(Color::from_hex("").is_err());
        assert!(Color::from_hex("#+12345").is_err());
    }

    #[test]
    fn css_and_display() {
        assert_eq!(BACKGROUND.to_css(), "rgba(11, 0, 24, 1)");
        assert_eq!(DEFAULT_PALETTE[4].to_string(), "#9370db");
        assert_eq!(Color::from_u32(0x11223344).to_string(), "#11223344");
    }

    #[test]
    fn palette_parsing_stops_at_first_bad_token() {
        let palette = parse_palette(&["#3B82F6", "#8B5CF6"]).unwrap();
        assert_eq!(palette, vec![DEFAULT_PALETTE[3], DEFAULT_PALETTE[2]]);
        assert!(parse_palette(&["#3B82F6", "blue"]).is_err());
    }
}
