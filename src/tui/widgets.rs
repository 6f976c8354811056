//! Custom widgets for the game UI

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
    buffer::Buffer,
};

/// A progress bar showing how many of the hidden clues were found
pub struct ClueGauge {
    found: usize,
    total: usize,
    label: String,
    color: Color,
}

impl ClueGauge {
    pub fn new(label: &str, found: usize, total: usize) -> Self {
        Self {
            found,
            total,
            label: label.to_string(),
            color: Color::Green,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Cells to fill in a bar `width` cells wide
    fn filled(&self, width: u16) -> u16 {
        if self.total == 0 {
            return 0;
        }
        ((self.found.min(self.total) * width as usize) / self.total) as u16
    }
}

impl Widget for ClueGauge {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        // Label
        let label = format!("{}: {}/{}", self.label, self.found, self.total);
        buf.set_string(area.x, area.y, &label, Style::default().fg(self.color));

        if area.height > 1 {
            let bar_y = area.y + 1;
            let inner = area.width - 2;
            let filled = self.filled(inner);
            // Bar
            buf.set_string(area.x, bar_y, "[", Style::default());
            buf.set_string(area.x + area.width - 1, bar_y, "]", Style::default());

            for x in 0..filled {
                buf.set_string(area.x + 1 + x, bar_y, "█", Style::default().fg(self.color));
            }
            for x in filled..inner {
                buf.set_string(area.x + 1 + x, bar_y, "░", Style::default().fg(Color::DarkGray));
            }
        }
    }
}

/// Double-lined box for the verdict
pub struct CaseFileBox {
    title: String,
    content: Vec<String>,
    border_color: Color,
}

impl CaseFileBox {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: Vec::new(),
            border_color: Color::Red,
        }
    }

    pub fn content(mut self, lines: Vec<String>) -> Self {
        self.content = lines;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }
}

impl Widget for CaseFileBox {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }
        let style = Style::default().fg(self.border_color);
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        // Top and bottom borders
        buf.set_string(area.x, area.y, "╔", style);
        buf.set_string(area.x, bottom, "╚", style);
        for x in area.x + 1..right {
            buf.set_string(x, area.y, "═", style);
            buf.set_string(x, bottom, "═", style);
        }
        buf.set_string(right, area.y, "╗", style);
        buf.set_string(right, bottom, "╝", style);

        // Sides
        for y in area.y + 1..bottom {
            buf.set_string(area.x, y, "║", style);
            buf.set_string(right, y, "║", style);
        }

        // Title over the top border
        let title = format!(" {} ", self.title);
        let title_width = title.chars().count() as u16;
        if title_width < area.width {
            buf.set_string(area.x + (area.width - title_width) / 2, area.y, title, style);
        }

        // Content
        let text_width = (area.width - 4) as usize;
        for (i, line) in self.content.iter().enumerate() {
            let y = area.y + 1 + i as u16;
            if y >= bottom {
                break;
            }
            let line: String = line.chars().take(text_width).collect();
            buf.set_string(area.x + 2, y, line, Style::default().fg(Color::White));
        }
    }
}
