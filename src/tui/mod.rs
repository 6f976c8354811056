//! Terminal User Interface
//!
//! Full-screen front end for the mystery using ratatui

pub mod app;
pub mod widgets;

pub use app::App;

use crate::data::Tone;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Color scheme for the game
pub struct Theme {
    pub fg: Color,
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub warning: Color,
    pub border: Color,
    pub header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            alert: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            border: Color::DarkGray,
            header: Color::Magenta,
        }
    }
}

/// Get color for a message tone
pub fn tone_color(tone: &Tone) -> Color {
    match tone {
        Tone::Narration => Color::Gray,
        Tone::Discovery => Color::Green,
        Tone::Warning => Color::Yellow,
        Tone::Verdict => Color::Magenta,
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// ASCII art logo
pub const LOGO: &str = r#"
╔══════════════════════════════════════════════════════╗
║                                                      ║
║     ____       _            _   _                    ║
║    |  _ \  ___| |_ ___  ___| |_(_)_   _____          ║
║    | | | |/ _ \ __/ _ \/ __| __| \ \ / / _ \         ║
║    | |_| |  __/ ||  __/ (__| |_| |\ V /  __/         ║
║    |____/ \___|\__\___|\___|\__|_| \_/ \___|         ║
║                                                      ║
║                 Q   U   E   S   T                    ║
║                                                      ║
╚══════════════════════════════════════════════════════╝
"#;

/// Smaller logo for header
pub const SMALL_LOGO: &str = " DETECTIVE QUEST ";

/// Help text
pub const HELP_TEXT: &str = r#"
╔═══════════════════════════════════════════════╗
║                   CONTROLS                    ║
╠═══════════════════════════════════════════════╣
║  e     Take the left exit                     ║
║  d     Take the right exit                    ║
║  s     Stop exploring and make an accusation  ║
║  ?     Toggle this help                       ║
╠═══════════════════════════════════════════════╣
║                  ACCUSATION                   ║
╠═══════════════════════════════════════════════╣
║  Type the suspect's name, Enter to accuse     ║
║  Backspace deletes, Esc clears                ║
╠═══════════════════════════════════════════════╣
║  q     Quit once the case is closed           ║
╚═══════════════════════════════════════════════╝
"#;

/// Create the main layout
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),   // Header
            Constraint::Min(10),     // Main content
            Constraint::Length(1),   // Status bar
        ])
        .split(area)
        .to_vec()
}

/// Create the game content layout (room panel + story/notebook)
pub fn create_content_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),  // Room and exits
            Constraint::Percentage(65),  // Story and notebook
        ])
        .split(area)
        .to_vec()
}

/// Create the right-hand area layout (story log + notebook)
pub fn create_main_area_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60),  // Story log
            Constraint::Percentage(40),  // Notebook
        ])
        .split(area)
        .to_vec()
}

/// Rectangle of the given size centered in `area`, clamped to it
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
