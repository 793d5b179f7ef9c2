use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use crossterm::event::KeyCode;

/// Spinner glyphs, advanced every `SPIN_STEP_MS`
const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];
const SPIN_STEP_MS: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play,
    Quit,
}

const ITEMS: [(MenuChoice, &str); 2] = [(MenuChoice::Play, "Play"), (MenuChoice::Quit, "Quit")];

/// Title screen shown before the first game
pub struct WelcomeMenu {
    pub selected: usize,
    elapsed_ms: u32,
}

impl WelcomeMenu {
    pub fn new() -> Self {
        Self {
            selected: 0,
            elapsed_ms: 0,
        }
    }

    pub fn choice(&self) -> MenuChoice {
        ITEMS[self.selected].0
    }

    pub fn tick(&mut self, dt: u32) {
        self.elapsed_ms = self.elapsed_ms.wrapping_add(dt);
    }

    pub fn spinner_frame(&self) -> usize {
        (self.elapsed_ms / SPIN_STEP_MS) as usize % SPINNER.len()
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Option<MenuChoice> {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(ITEMS.len() - 1)
            }
            KeyCode::Enter | KeyCode::Char(' ') => return Some(self.choice()),
            _ => {}
        }
        None
    }

    pub fn render(&self, f: &mut Frame, area: Rect, x_color: Color, o_color: Color) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([Constraint::Length(5), Constraint::Min(4), Constraint::Length(1)])
            .split(area);

        // The spinner alternates player colors as it turns.
        let frame = self.spinner_frame();
        let spin_color = if frame % 2 == 0 { x_color } else { o_color };
        let icon = Span::styled(
            SPINNER[frame],
            Style::default().fg(spin_color).add_modifier(Modifier::BOLD),
        );
        let heading = Span::styled("TIC TAC TOE", Style::default().add_modifier(Modifier::BOLD));
        let title = vec![
            Line::from(vec![icon.clone(), Span::raw("  "), heading, Span::raw("  "), icon]),
            Line::from(""),
            Line::from(vec![
                Span::styled("X", Style::default().fg(x_color).add_modifier(Modifier::BOLD)),
                Span::raw(" vs "),
                Span::styled("O", Style::default().fg(o_color).add_modifier(Modifier::BOLD)),
            ]),
        ];
        f.render_widget(
            Paragraph::new(title)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            chunks[0],
        );

        let items: Vec<ListItem> = ITEMS
            .iter()
            .enumerate()
            .map(|(i, (_, label))| {
                let style = if i == self.selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let marker = if i == self.selected { "▶" } else { " " };
                ListItem::new(format!(" {marker} {label}")).style(style)
            })
            .collect();
        f.render_widget(
            List::new(items).block(Block::default().title(" WELCOME ").borders(Borders::ALL)),
            chunks[1],
        );

        f.render_widget(
            Paragraph::new("[↑/↓] Navigate  [Enter] Select  [Click] Play  [Q] Quit")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray)),
            chunks[2],
        );
    }
}

impl Default for WelcomeMenu {
    fn default() -> Self {
        Self::new()
    }
}
