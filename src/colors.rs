use crossterm::style::Color;
use rand::seq::SliceRandom;
use rand::Rng;

pub const PEACH: Color = Color::Rgb { r: 0xec, g: 0x82, b: 0x78 };
pub const PURPLE: Color = Color::Rgb { r: 0x60, g: 0x3d, b: 0xd1 };
pub const YELLOW: Color = Color::Rgb { r: 0xea, g: 0xea, b: 0x5c };

/// Wind colors; purple appears twice so it turns up half the time
pub const WIND_PALETTE: [Color; 4] = [PEACH, PURPLE, PURPLE, YELLOW];

/// Resting chime
pub const CHIME_IDLE: Color = Color::DarkGrey;
/// Chime that rang within the last few frames
pub const CHIME_GLOW: Color = Color::White;

pub const HUD_TEXT: Color = Color::Grey;
pub const HUD_MUTED: Color = Color::DarkGrey;

/// Pick a wind color at random from the palette
pub fn choose_wind_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    WIND_PALETTE.choose(rng).copied().unwrap_or(PURPLE)
}
