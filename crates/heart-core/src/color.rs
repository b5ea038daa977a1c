use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An 8-bit-per-channel RGBA color.
///
/// Serializes as an uppercase `RRGGBBAA` hex string, the same text the
/// menu shows and the text-entry dialog accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Uppercase `RRGGBBAA`.
    pub fn to_hex_string(&self) -> String {
        format!("{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Parse the first eight characters as `RRGGBBAA`.
    ///
    /// Returns `None` when the string is shorter than eight characters or
    /// any of the first eight is not a hex digit. Anything past the eighth
    /// character is ignored.
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.get(..8)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?))
    }

    /// Pack into a big-endian `u32` (`0xRRGGBBAA`).
    pub fn to_packed(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    pub fn from_packed(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_be_bytes();
        Self::rgba(r, g, b, a)
    }

    /// Per-channel interpolation with `amount` clamped to [0, 1].
    /// Channels are truncated, not rounded.
    pub fn lerp(from: Color, to: Color, amount: f32) -> Self {
        let t = amount.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Self::rgba(
            ch(from.r, to.r),
            ch(from.g, to.g),
            ch(from.b, to.b),
            ch(from.a, to.a),
        )
    }

    /// Scale every channel, alpha included, by `scale`.
    pub fn scaled(self, scale: f32) -> Self {
        let ch = |c: u8| (c as f32 * scale).clamp(0.0, 255.0) as u8;
        Self::rgba(ch(self.r), ch(self.g), ch(self.b), ch(self.a))
    }
}

impl std::ops::Mul<f32> for Color {
    type Output = Color;
    fn mul(self, rhs: f32) -> Color {
        self.scaled(rhs)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid RRGGBBAA color: {s:?}")))
    }
}
