use tracing::debug;

use super::ThemeVariant;

/// Luma above which the terminal background is treated as light.
const LIGHT_LUMA: f32 = 0.6;

/// Guess whether the terminal has a dark or light background.
/// Falls back to dark when the terminal does not answer.
pub fn detect_terminal_theme() -> ThemeVariant {
    match terminal_light::luma() {
        Ok(luma) if luma > LIGHT_LUMA => ThemeVariant::Light,
        Ok(_) => ThemeVariant::Dark,
        Err(err) => {
            debug!(%err, "terminal background detection failed");
            ThemeVariant::Dark
        }
    }
}
