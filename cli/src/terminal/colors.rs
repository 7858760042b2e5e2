use colored::Color;

pub const PRIMARY: Color = Color::BrightBlue;
pub const ACCENT: Color = Color::BrightMagenta;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const IPV4_ADDR: Color = Color::BrightGreen;
pub const IPV6_ADDR: Color = Color::BrightCyan;
pub const MAC_ADDR: Color = Color::BrightYellow;
pub const PREFIX: Color = Color::Magenta;

pub const INVALID: Color = Color::BrightRed;
pub const MUTED: Color = Color::BrightBlack;
