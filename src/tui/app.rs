//! Main application state and rendering

use crate::data::Side;
use crate::game::verdict::MAX_ACCUSATION_CHARS;
use crate::game::{Command, Game, GameOptions, GamePhase, Scenario};
use crate::tui::widgets::{CaseFileBox, ClueGauge};
use crate::tui::{centered_rect, styled_block, tone_color, Theme, HELP_TEXT, LOGO, SMALL_LOGO};
use crate::tui::{create_content_layout, create_main_area_layout, create_main_layout};
use crate::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;
use tracing::warn;

/// Application state
pub struct App {
    pub game: Game,
    pub theme: Theme,
    pub running: bool,
    pub show_help: bool,
    pub current_screen: Screen,
    pub input_buffer: String,
    scenario: Scenario,
    options: GameOptions,
}

/// Current screen being displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Title,
    Exploring,
    Accusation,
    CaseClosed,
}

impl App {
    pub fn new(scenario: Scenario, options: GameOptions) -> Result<Self> {
        let game = Game::new(&scenario, options)?;
        Ok(Self {
            game,
            theme: Theme::default(),
            running: true,
            show_help: false,
            current_screen: Screen::Title,
            input_buffer: String::new(),
            scenario,
            options,
        })
    }

    /// Wait briefly for a key and apply it. Returns `false` to quit.
    pub fn handle_input(&mut self) -> std::io::Result<bool> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(true);
                }
                return Ok(self.handle_key(key.code));
            }
        }
        Ok(true)
    }

    /// Apply one key press. Returns `false` to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return true;
        }

        match self.current_screen {
            Screen::Title => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('?') => self.show_help = true,
                _ => self.current_screen = Screen::Exploring,
            },
            Screen::Exploring => match code {
                KeyCode::Char('?') => self.show_help = true,
                KeyCode::Char(key) => {
                    self.game.execute(Command::parse(key));
                    if self.game.phase == GamePhase::Accusation {
                        self.input_buffer.clear();
                        self.current_screen = Screen::Accusation;
                    }
                }
                _ => {}
            },
            Screen::Accusation => match code {
                KeyCode::Enter => self.submit_accusation(),
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Esc => self.input_buffer.clear(),
                KeyCode::Char(c) => {
                    if self.input_buffer.chars().count() < MAX_ACCUSATION_CHARS {
                        self.input_buffer.push(c);
                    }
                }
                _ => {}
            },
            Screen::CaseClosed => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('r') => self.restart(),
                _ => {}
            },
        }
        self.running
    }

    fn submit_accusation(&mut self) {
        if self.input_buffer.trim().is_empty() {
            return;
        }
        match self.game.accuse(&self.input_buffer) {
            Ok(_) => self.current_screen = Screen::CaseClosed,
            Err(err) => warn!("accusation rejected: {}", err),
        }
    }

    /// Start the same scenario over with a fresh mansion
    fn restart(&mut self) {
        match Game::new(&self.scenario, self.options) {
            Ok(game) => {
                self.game = game;
                self.input_buffer.clear();
                self.current_screen = Screen::Exploring;
            }
            Err(err) => warn!("could not restart: {}", err),
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        match self.current_screen {
            Screen::Title => self.render_title(frame),
            Screen::Exploring | Screen::Accusation => self.render_game(frame),
            Screen::CaseClosed => self.render_case_closed(frame),
        }

        // Overlay help if showing
        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_title(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);

        let logo_height = LOGO.lines().count() as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(logo_height),
                Constraint::Length(2),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let logo = Paragraph::new(LOGO)
            .style(Style::default().fg(self.theme.accent))
            .alignment(Alignment::Center);
        frame.render_widget(logo, chunks[0]);

        let title = Paragraph::new(self.game.title.as_str())
            .style(Style::default().fg(self.theme.header).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(title, chunks[1]);

        let synopsis = Paragraph::new(self.game.synopsis.as_str())
            .style(Style::default().fg(self.theme.fg))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(synopsis, chunks[2]);

        let footer = Paragraph::new("Press any key to enter the mansion | ? for help | q to quit")
            .style(Style::default().fg(self.theme.border))
            .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[3]);
    }

    fn render_game(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = create_main_layout(area);

        self.render_header(frame, layout[0]);

        let content_layout = create_content_layout(layout[1]);
        self.render_room_panel(frame, content_layout[0]);

        let main_layout = create_main_area_layout(content_layout[1]);
        self.render_messages(frame, main_layout[0]);

        if self.current_screen == Screen::Accusation {
            self.render_accusation(frame, main_layout[1]);
        } else {
            self.render_notebook(frame, main_layout[1]);
        }

        self.render_status_bar(frame, layout[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(20),
                Constraint::Min(20),
                Constraint::Length(18),
            ])
            .split(area);

        let border = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));

        let logo = Paragraph::new(SMALL_LOGO)
            .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .block(border.clone());
        frame.render_widget(logo, header_layout[0]);

        let title = Paragraph::new(self.game.title.as_str())
            .style(Style::default().fg(self.theme.warning))
            .alignment(Alignment::Center)
            .block(border.clone());
        frame.render_widget(title, header_layout[1]);

        let moves = Paragraph::new(format!(" Moves {} ", self.game.stats.moves))
            .style(Style::default().fg(self.theme.fg))
            .alignment(Alignment::Right)
            .block(border);
        frame.render_widget(moves, header_layout[2]);
    }

    fn render_room_panel(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),   // Room name
                Constraint::Min(5),      // Exits
                Constraint::Length(4),   // Clue progress
            ])
            .split(area);

        let room = Paragraph::new(Line::from(Span::styled(
            self.game.current_room().name(),
            Style::default().fg(self.theme.header).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(styled_block("You are in", &self.theme));
        frame.render_widget(room, chunks[0]);

        let mut exits: Vec<ListItem> = self
            .game
            .exits()
            .into_iter()
            .map(|side| {
                let label = match side {
                    Side::Left => "Go left",
                    Side::Right => "Go right",
                };
                ListItem::new(format!("  [{}] {}", side.key().to_ascii_uppercase(), label))
            })
            .collect();
        if exits.is_empty() {
            exits.push(ListItem::new("  Dead end").style(Style::default().fg(self.theme.border)));
        }
        exits.push(ListItem::new("  ───────────────"));
        exits.push(ListItem::new("  [S] Stop and accuse"));
        exits.push(ListItem::new("  [?] Help"));

        let exit_list = List::new(exits).block(styled_block("Exits", &self.theme));
        frame.render_widget(exit_list, chunks[1]);

        let found = self.game.notebook().len();
        let total = found + self.game.hidden_clues();
        let block = styled_block("Progress", &self.theme);
        let inner = block.inner(chunks[2]);
        frame.render_widget(block, chunks[2]);
        frame.render_widget(ClueGauge::new("Clues", found, total).color(self.theme.success), inner);
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect) {
        let visible_lines = area.height.saturating_sub(2) as usize;
        let start = self.game.message_log.len().saturating_sub(visible_lines);
        let lines: Vec<Line> = self.game.message_log[start..]
            .iter()
            .map(|message| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", message.timestamp.format("%H:%M:%S")),
                        Style::default().fg(self.theme.border),
                    ),
                    Span::styled(
                        format!("{} {}", message.tone.symbol(), message.message),
                        Style::default().fg(tone_color(&message.tone)),
                    ),
                ])
            })
            .collect();

        let story = Paragraph::new(lines)
            .block(styled_block("Story", &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(story, area);
    }

    fn render_notebook(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .game
            .clues()
            .map(|clue| ListItem::new(format!("  ✦ {}", clue)))
            .collect();

        let title = format!("Notebook ({})", self.game.notebook().len());
        let notebook = List::new(items).block(styled_block(&title, &self.theme));
        frame.render_widget(notebook, area);
    }

    fn render_accusation(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(area);

        let clues: Vec<&str> = self.game.clues().collect();
        let text = vec![
            Line::from(vec![
                Span::raw("Clues: "),
                Span::styled(
                    if clues.is_empty() { "(none)".to_string() } else { clues.join(", ") },
                    Style::default().fg(self.theme.success),
                ),
            ]),
            Line::from(vec![
                Span::raw("Suspects: "),
                Span::styled(
                    self.game.suspects().join(", "),
                    Style::default().fg(self.theme.warning),
                ),
            ]),
        ];
        let summary = Paragraph::new(text)
            .block(styled_block("The Accusation", &self.theme))
            .wrap(Wrap { trim: true });
        frame.render_widget(summary, chunks[0]);

        let input = Paragraph::new(format!("Who did it? {}_", self.input_buffer))
            .style(Style::default().fg(Color::Green))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green))
                    .title(" Name the culprit "),
            );
        frame.render_widget(input, chunks[1]);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let status = Paragraph::new(format!(" {} | Press ? for help ", self.game.check_status()))
            .style(Style::default().fg(self.theme.fg).bg(Color::DarkGray));
        frame.render_widget(status, area);
    }

    fn render_case_closed(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);

        let GamePhase::CaseClosed(verdict) = &self.game.phase else {
            return;
        };

        let mut lines = vec![
            format!("Accused: {}", verdict.accused),
            String::new(),
            verdict.summary(),
            String::new(),
            "Evidence:".to_string(),
        ];
        for exhibit in &verdict.evidence {
            lines.push(format!(
                "  {} -> {}",
                exhibit.clue,
                exhibit.suspect.as_deref().unwrap_or("nobody")
            ));
        }
        lines.push(String::new());
        lines.push("Press r to play again, q to quit".to_string());

        let color = if verdict.is_sustained() { self.theme.success } else { self.theme.alert };
        let height = lines.len() as u16 + 2;
        let box_area = centered_rect(70, height, area);
        frame.render_widget(
            CaseFileBox::new("CASE CLOSED").content(lines).border_color(color),
            box_area,
        );
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_area = centered_rect(52, 18, area);

        frame.render_widget(Clear, popup_area);

        let help = Paragraph::new(HELP_TEXT)
            .style(Style::default().fg(self.theme.fg))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.accent)),
            );
        frame.render_widget(help, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ClueLink, RoomPlan};
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let scenario = Scenario {
            title: "Garden Case".to_string(),
            synopsis: String::new(),
            entrance: RoomPlan::new("Hall")
                .left(RoomPlan::new("Greenhouse").clue("Muddy Boots"))
                .right(RoomPlan::new("Shed").clue("Pruning Shears")),
            testimony: vec![
                ClueLink::new("Muddy Boots", "Gardener"),
                ClueLink::new("Pruning Shears", "Gardener"),
            ],
            buckets: 10,
        };
        App::new(scenario, GameOptions::default()).unwrap()
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_full_round_through_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.current_screen, Screen::Exploring);

        // Greenhouse is a dead end, so the second move is blocked
        type_text(&mut app, "ee");
        assert_eq!(app.game.current_room().name(), "Greenhouse");
        assert_eq!(app.game.stats.blocked_moves, 1);

        type_text(&mut app, "s");
        assert_eq!(app.current_screen, Screen::Accusation);

        type_text(&mut app, "Gardener");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.current_screen, Screen::CaseClosed);
        match &app.game.phase {
            GamePhase::CaseClosed(verdict) => assert_eq!(verdict.matches, 1),
            other => panic!("unexpected phase {:?}", other),
        }

        assert!(!app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn test_empty_accusation_is_ignored() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        type_text(&mut app, "s");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.current_screen, Screen::Accusation);

        type_text(&mut app, "Bx");
        app.handle_key(KeyCode::Backspace);
        assert_eq!(app.input_buffer, "B");
    }

    #[test]
    fn test_restart_resets_mansion() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        type_text(&mut app, "es");
        type_text(&mut app, "Butler");
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.current_screen, Screen::Exploring);
        assert_eq!(app.game.notebook().len(), 0);
        assert_eq!(app.game.hidden_clues(), 2);
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('?'));
        app.handle_key(KeyCode::Char('e'));
        assert_eq!(app.game.current_room().name(), "Hall");
        app.handle_key(KeyCode::Esc);
        app.handle_key(KeyCode::Char('e'));
        assert_eq!(app.game.current_room().name(), "Greenhouse");
    }

    #[test]
    fn test_every_screen_renders() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        for keys in ["", "x", "d", "s", "Gardener"] {
            type_text(&mut app, keys);
            terminal.draw(|frame| app.render(frame)).unwrap();
        }
        app.handle_key(KeyCode::Enter);
        terminal.draw(|frame| app.render(frame)).unwrap();
        assert_eq!(app.current_screen, Screen::CaseClosed);
    }
}
