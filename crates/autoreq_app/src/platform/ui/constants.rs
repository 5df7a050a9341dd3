use ratatui::style::Color;

pub const APP_TITLE: &str = "AutoReqPy";
pub const KEY_HELP: &str = "Enter generate · Ctrl+Y copy · Ctrl+S save · Esc quit";
pub const COPY_HINT: &str = "[Ctrl+Y] Copy";

pub const ACCENT: Color = Color::Blue;
pub const HIGHLIGHT: Color = Color::Magenta;
pub const ERROR: Color = Color::Red;
pub const MUTED: Color = Color::DarkGray;
