//! Picking readable text over arbitrary cell backgrounds.

use ratatui::style::Color;

/// Minimum contrast ratio for light text to be kept over a background.
const CONTRAST_THRESHOLD: f64 = 3.0;

/// White when it reaches [`CONTRAST_THRESHOLD`] against `background`, black
/// otherwise. `None` when the background is the terminal default.
pub fn contrast_text(background: Color) -> Option<Color> {
    let (r, g, b) = approximate_rgb(background)?;
    let luminance = relative_luminance(r, g, b);
    let ratio = (1.0 + 0.05) / (luminance + 0.05);
    Some(if ratio >= CONTRAST_THRESHOLD {
        Color::White
    } else {
        Color::Black
    })
}

fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel(c: u8) -> f64 {
        let c = f64::from(c) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// xterm defaults for the 16 named colors and the 256-color palette.
fn approximate_rgb(color: Color) -> Option<(u8, u8, u8)> {
    let rgb = match color {
        Color::Reset => return None,
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0, 0, 0),
        Color::Red => (205, 0, 0),
        Color::Green => (0, 205, 0),
        Color::Yellow => (205, 205, 0),
        Color::Blue => (0, 0, 238),
        Color::Magenta => (205, 0, 205),
        Color::Cyan => (0, 205, 205),
        Color::Gray => (229, 229, 229),
        Color::DarkGray => (127, 127, 127),
        Color::LightRed => (255, 0, 0),
        Color::LightGreen => (0, 255, 0),
        Color::LightYellow => (255, 255, 0),
        Color::LightBlue => (92, 92, 255),
        Color::LightMagenta => (255, 0, 255),
        Color::LightCyan => (0, 255, 255),
        Color::White => (255, 255, 255),
        Color::Indexed(idx) => return indexed_rgb(idx),
    };
    Some(rgb)
}

fn indexed_rgb(idx: u8) -> Option<(u8, u8, u8)> {
    const NAMED: [Color; 16] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::Gray,
        Color::DarkGray,
        Color::LightRed,
        Color::LightGreen,
        Color::LightYellow,
        Color::LightBlue,
        Color::LightMagenta,
        Color::LightCyan,
        Color::White,
    ];
    match idx {
        0..=15 => approximate_rgb(NAMED[idx as usize]),
        16..=231 => {
            let i = idx - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            Some((level(i / 36), level((i / 6) % 6), level(i % 6)))
        }
        _ => {
            let gray = 8 + (idx - 232) * 10;
            Some((gray, gray, gray))
        }
    }
}
