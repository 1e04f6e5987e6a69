use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(0x4f, 0x46, 0xe5);
pub const CARD_BORDER: Color = Color::Rgb(0x40, 0x40, 0x40);
pub const HEADER_TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const VALUE_TEXT: Color = Color::Rgb(0xff, 0xff, 0xff);
pub const INCREMENT: Color = Color::Rgb(0x22, 0xc5, 0x5e);
pub const DECREMENT: Color = Color::Rgb(0xef, 0x44, 0x44);
pub const NEUTRAL: Color = Color::Rgb(0xd1, 0xd5, 0xdb);
pub const DISABLED: Color = Color::Rgb(0x9c, 0xa3, 0xaf);
pub const STATUS_ERROR: Color = Color::Rgb(0xef, 0x44, 0x44);
pub const FOCUS_HIGHLIGHT: Color = Color::Rgb(0x26, 0x26, 0x26);
