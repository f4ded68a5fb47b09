//! Color palette for the strata TUI.

use ratatui::style::Color;

pub const C_BG: Color = Color::Rgb(18, 18, 18);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_PLAYING: Color = Color::Rgb(80, 200, 120);
pub const C_ERROR: Color = Color::Rgb(255, 80, 80);
pub const C_DIRECTORY: Color = Color::Rgb(80, 140, 200);
pub const C_SELECTION_BG: Color = Color::Rgb(28, 28, 40);
