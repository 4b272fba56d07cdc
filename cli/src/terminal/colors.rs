use colored::Color;

pub const PRIMARY: Color = Color::BrightCyan;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const IPV4_ADDR: Color = Color::BrightBlue;
pub const MAC_ADDR: Color = Color::Magenta;
pub const VENDOR: Color = Color::Cyan;

pub const AUTHORIZED: Color = Color::Green;
pub const ROGUE: Color = Color::Red;
