//! Color parsing for template style strings.
//!
//! Templates carry colors as strings (`"#rrggbb"`, `"#rrggbbaa"`, `"#rgb"`,
//! a few CSS names, or the `"transparent"` sentinel). Parsing happens once
//! at scene-build time; draw ops carry premultiplied-nothing plain RGBA.

/// An RGBA color, 8 bits per channel.
pub type Rgba = [u8; 4];

pub const BLACK: Rgba = [0, 0, 0, 255];
pub const WHITE: Rgba = [255, 255, 255, 255];
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Parse a color string. Returns `None` for unrecognized input so callers
/// choose their own fallback (black for ink, transparent for fills).
pub fn parse(s: &str) -> Option<Rgba> {
    let s = s.trim();
    match s.to_ascii_lowercase().as_str() {
        "transparent" | "none" | "" => return Some(TRANSPARENT),
        "black" => return Some(BLACK),
        "white" => return Some(WHITE),
        "red" => return Some([255, 0, 0, 255]),
        "green" => return Some([0, 128, 0, 255]),
        "blue" => return Some([0, 0, 255, 255]),
        "gray" | "grey" => return Some([128, 128, 128, 255]),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    match hex.len() {
        3 => {
            let mut out = [0u8; 4];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 17;
            }
            out[3] = 255;
            Some(out)
        }
        6 | 8 => {
            let mut out = [0u8, 0, 0, 255];
            for i in 0..hex.len() / 2 {
                out[i] = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
            }
            Some(out)
        }
        _ => None,
    }
}

/// Ink fallback: unparseable strings draw black rather than vanishing.
pub fn parse_ink(s: &str) -> Rgba {
    match parse(s) {
        Some(TRANSPARENT) | None => BLACK,
        Some(c) => c,
    }
}

/// Fill fallback: unparseable strings paint nothing.
pub fn parse_fill(s: &str) -> Rgba {
    parse(s).unwrap_or(TRANSPARENT)
}

pub fn is_transparent(c: Rgba) -> bool {
    c[3] == 0
}

/// Hex form for the SVG target (`#rrggbb`; alpha handled separately).
pub fn to_hex(c: Rgba) -> String {
    format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2])
}
