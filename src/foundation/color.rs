use std::str::FromStr;

use crate::foundation::core::{Rgba8, unit_to_u8};
use crate::foundation::error::{ThumbError, ThumbResult};

/// Parse a CSS-like color string.
///
/// Accepted forms: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
/// `rgba(r, g, b, a)` (channels 0..=255, alpha 0..=1) and a handful of names.
pub fn parse_color(s: &str) -> ThumbResult<Rgba8> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    if let Some(body) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
    {
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| ThumbError::validation(format!("unterminated color function \"{s}\"")))?;
        return parse_rgb_fn(body, s);
    }

    named(&lower).ok_or_else(|| ThumbError::validation(format!("unrecognized color \"{s}\"")))
}

impl FromStr for Rgba8 {
    type Err = ThumbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_color(&s).map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        ))
    }
}

fn parse_hex(hex: &str) -> ThumbResult<Rgba8> {
    fn nibble(c: u8) -> ThumbResult<u8> {
        (c as char)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| ThumbError::validation(format!("invalid hex digit '{}'", c as char)))
    }

    let b = hex.as_bytes();
    let byte = |i: usize| -> ThumbResult<u8> { Ok(nibble(b[i])? << 4 | nibble(b[i + 1])?) };
    let short = |i: usize| -> ThumbResult<u8> { nibble(b[i]).map(|n| n << 4 | n) };

    match b.len() {
        3 => Ok(Rgba8::rgb(short(0)?, short(1)?, short(2)?)),
        4 => Ok(Rgba8::new(short(0)?, short(1)?, short(2)?, short(3)?)),
        6 => Ok(Rgba8::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Ok(Rgba8::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => Err(ThumbError::validation(
            "hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA",
        )),
    }
}

fn parse_rgb_fn(body: &str, original: &str) -> ThumbResult<Rgba8> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ThumbError::validation(format!(
            "color function \"{original}\" needs 3 or 4 components"
        )));
    }

    let channel = |p: &str| -> ThumbResult<u8> {
        let v: f64 = p
            .parse()
            .map_err(|_| ThumbError::validation(format!("invalid color channel \"{p}\"")))?;
        Ok(v.clamp(0.0, 255.0).round() as u8)
    };

    let a = match parts.get(3) {
        Some(p) => {
            let v: f64 = p
                .parse()
                .map_err(|_| ThumbError::validation(format!("invalid alpha \"{p}\"")))?;
            unit_to_u8(v)
        }
        None => 255,
    };

    Ok(Rgba8::new(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        a,
    ))
}

fn named(name: &str) -> Option<Rgba8> {
    Some(match name {
        "black" => Rgba8::BLACK,
        "white" => Rgba8::WHITE,
        "transparent" => Rgba8::TRANSPARENT,
        "red" => Rgba8::rgb(255, 0, 0),
        "green" => Rgba8::rgb(0, 128, 0),
        "blue" => Rgba8::rgb(0, 0, 255),
        "gray" | "grey" => Rgba8::rgb(128, 128, 128),
        _ => return None,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
