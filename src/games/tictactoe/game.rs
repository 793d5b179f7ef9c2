use std::time::Duration;

use crossterm::event::{Event, KeyCode, MouseButton, MouseEvent, MouseEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info};

use super::effects::Effects;
use super::layout::BoardLayout;
use super::state::{GameState, Mark, Outcome, Placement, Player, SIZE};
use crate::config::{Config, Rgb, Theme};
use crate::core::audio::SoundCue;
use crate::core::game::{Context, Flow, Game};
use crate::core::menu::{MenuChoice, WelcomeMenu};

const X_ART: [&str; 3] = ["╲   ╱", "  ╳  ", "╱   ╲"];
const O_ART: [&str; 3] = ["╭───╮", "│   │", "╰───╯"];
const WHITE: Rgb = Rgb(255, 255, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Playing,
}

/// The tic-tac-toe screen: input mapping, cosmetic effects and rendering
/// around a [`GameState`].
pub struct TicTacToe {
    state: GameState,
    screen: Screen,
    menu: WelcomeMenu,
    effects: Effects,
    layout: BoardLayout,
    cursor: (usize, usize),
    theme: Theme,
    tick_rate: Duration,
    rng: StdRng,
}

impl TicTacToe {
    pub fn new(config: &Config) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Deterministic confetti, for tests and replays.
    pub fn with_seed(config: &Config, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &Config, rng: StdRng) -> Self {
        Self {
            state: GameState::new(),
            screen: if config.welcome { Screen::Welcome } else { Screen::Playing },
            menu: WelcomeMenu::new(),
            effects: Effects::new(config.glow_ms, config.confetti, config.transition_ms),
            layout: BoardLayout::default(),
            cursor: (1, 1),
            theme: config.theme.clone(),
            tick_rate: config.tick_rate(),
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Leave the welcome screen and fade the board in.
    pub fn start(&mut self, ctx: &Context) {
        info!("game started");
        self.screen = Screen::Playing;
        self.effects.transition.start();
        ctx.play(SoundCue::Start);
    }

    /// Try a move; rejected moves are logged and otherwise ignored.
    pub fn place(&mut self, row: usize, col: usize, ctx: &Context) -> Option<Placement> {
        let placement = match self.state.place(row, col) {
            Ok(p) => p,
            Err(e) => {
                debug!(row, col, error = %e, "move ignored");
                return None;
            }
        };

        debug!(row, col, player = %placement.player, "mark placed");
        self.effects.on_placement(&placement, self.layout.center(), &mut self.rng);
        ctx.play(match placement.player {
            Player::X => SoundCue::MoveX,
            Player::O => SoundCue::MoveO,
        });

        match placement.outcome {
            Outcome::Won { player, line } => {
                info!(%player, ?line, moves = self.state.move_count(), "game won");
                ctx.play(SoundCue::Win);
            }
            Outcome::Draw => {
                info!("game drawn");
                ctx.play(SoundCue::Draw);
            }
            Outcome::InProgress => {}
        }
        Some(placement)
    }

    /// Fresh board; glow and confetti are dropped with it.
    pub fn restart(&mut self, ctx: &Context) {
        info!(moves = self.state.move_count(), "restart");
        self.state.restart();
        self.effects.reset();
        self.cursor = (1, 1);
        ctx.play(SoundCue::Restart);
    }

    fn click(&mut self, x: u16, y: u16, ctx: &Context) {
        if self.layout.restart_hit(x, y) {
            self.restart(ctx);
        } else if let Some((row, col)) = self.layout.cell_at(x, y) {
            self.cursor = (row, col);
            self.place(row, col, ctx);
        }
    }

    fn handle_key(&mut self, code: KeyCode, ctx: &Context) {
        let (row, col) = self.cursor;
        match code {
            KeyCode::Char('r') | KeyCode::Char('R') => self.restart(ctx),
            KeyCode::Left | KeyCode::Char('h') => self.cursor.1 = col.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => self.cursor.1 = (col + 1).min(SIZE - 1),
            KeyCode::Up | KeyCode::Char('k') => self.cursor.0 = row.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.cursor.0 = (row + 1).min(SIZE - 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.place(row, col, ctx);
            }
            KeyCode::Char(d @ '1'..='9') => {
                let index = d as usize - '1' as usize;
                self.cursor = (index / SIZE, index % SIZE);
                self.place(index / SIZE, index % SIZE, ctx);
            }
            _ => {}
        }
    }

    fn status_line(&self) -> Line<'static> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        match self.state.outcome() {
            Outcome::InProgress => {
                let player = self.state.turn();
                Line::from(vec![
                    Span::styled(player.to_string(), bold.fg(self.player_color(player).into())),
                    Span::styled(" to move", bold.fg(Color::Black)),
                ])
            }
            Outcome::Won { player, .. } => Line::from(vec![
                Span::styled(player.to_string(), bold.fg(self.player_color(player).into())),
                Span::styled(" wins!", bold.fg(Color::Black)),
            ]),
            Outcome::Draw => Line::from(Span::styled("Draw!", bold.fg(Color::Black))),
        }
    }

    fn player_color(&self, player: Player) -> Rgb {
        match player {
            Player::X => self.theme.x,
            Player::O => self.theme.o,
        }
    }

    fn render_board(&self, f: &mut Frame, layout: &BoardLayout) {
        let fade = self.effects.transition.progress();
        let winning = self.state.winning_line();

        for row in 0..SIZE {
            for col in 0..SIZE {
                let rect = layout.cell_rect(row, col);
                if rect.is_empty() {
                    continue;
                }

                let on_line = winning.is_some_and(|l| l.contains(row, col));
                let border = if on_line {
                    self.theme.highlight
                } else {
                    self.theme.background_top.lerp(self.theme.grid, fade)
                };
                let mut block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border.into()));
                if (row, col) == self.cursor && !self.state.is_over() {
                    block = block
                        .border_type(BorderType::Thick)
                        .border_style(Style::default().fg(self.theme.highlight.into()));
                }
                let inner = block.inner(rect);
                f.render_widget(block, rect);
                if inner.is_empty() {
                    continue;
                }

                let mark = self.state.cell(row, col).unwrap_or_default();
                f.render_widget(self.mark_widget(mark, row, col, fade), inner);
            }
        }
    }

    fn mark_widget(&self, mark: Mark, row: usize, col: usize, fade: f32) -> Paragraph<'static> {
        let Some(player) = mark.player() else {
            let hint = format!("\n{}", row * SIZE + col + 1);
            return Paragraph::new(hint)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
        };

        let glow = self.effects.glow.intensity(row, col);
        let base = self.player_color(player);
        let color = base.lerp(WHITE, glow * 0.6);
        let color = self.theme.background_top.lerp(color, fade);
        let mut style = Style::default().fg(color.into());
        if glow > 0.5 {
            style = style.add_modifier(Modifier::BOLD);
        }

        let art = match player {
            Player::X => X_ART,
            Player::O => O_ART,
        };
        let lines: Vec<Line> = art.iter().map(|s| Line::from(*s)).collect();
        Paragraph::new(lines).alignment(Alignment::Center).style(style)
    }

    fn render_confetti(&self, buf: &mut Buffer, area: Rect) {
        let palette = [self.theme.x, self.theme.o, self.theme.highlight, self.theme.grid];
        for p in self.effects.confetti.particles() {
            if p.x < 0.0 || p.y < 0.0 {
                continue;
            }
            let (x, y) = (p.x.round() as u16, p.y.round() as u16);
            if x < area.right() && y < area.bottom() && x >= area.x && y >= area.y {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(p.glyph).set_fg(palette[p.hue % palette.len()].into());
                }
            }
        }
    }
}

/// Vertical gradient between the theme's two background colors.
fn paint_background(buf: &mut Buffer, area: Rect, top: Rgb, bottom: Rgb) {
    let span = area.height.saturating_sub(1).max(1) as f32;
    for dy in 0..area.height {
        let color = top.lerp(bottom, dy as f32 / span);
        buf.set_style(
            Rect::new(area.x, area.y + dy, area.width, 1),
            Style::default().bg(color.into()),
        );
    }
}

impl Game for TicTacToe {
    fn tick_rate(&self) -> Option<Duration> {
        Some(self.tick_rate)
    }

    fn on_tick(&mut self, dt: u32, _ctx: &Context) {
        if self.screen == Screen::Welcome {
            self.menu.tick(dt);
        }
        self.effects.tick(dt);
    }

    fn on_resize(&mut self, width: u16, height: u16) {
        self.layout = BoardLayout::new(Rect::new(0, 0, width, height));
    }

    fn handle_event(&mut self, event: Event, ctx: &Context) -> Flow {
        match (self.screen, event) {
            (Screen::Welcome, Event::Key(key)) => match self.menu.handle_key(key.code) {
                Some(MenuChoice::Play) => self.start(ctx),
                Some(MenuChoice::Quit) => return Flow::Quit,
                None => {}
            },
            (
                Screen::Welcome,
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    ..
                }),
            ) => self.start(ctx),
            (
                Screen::Playing,
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }),
            ) => self.click(column, row, ctx),
            (Screen::Playing, Event::Key(key)) => self.handle_key(key.code, ctx),
            _ => {}
        }
        Flow::Continue
    }

    fn render(&self, f: &mut Frame) {
        let area = f.area();
        paint_background(
            f.buffer_mut(),
            area,
            self.theme.background_top,
            self.theme.background_bottom,
        );

        if self.screen == Screen::Welcome {
            self.menu.render(f, area, self.theme.x.into(), self.theme.o.into());
            return;
        }

        let layout = BoardLayout::new(area);
        let header = vec![
            self.status_line(),
            Line::from(Span::styled(
                "[Click/Enter] Place  [1-9] Cell  [R] Restart  [Q] Quit",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(
            Paragraph::new(header).alignment(Alignment::Center),
            layout.header,
        );

        self.render_board(f, &layout);

        if !layout.restart.is_empty() {
            let button = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().bg(Color::White));
            f.render_widget(
                Paragraph::new("Restart")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Black).add_modifier(Modifier::BOLD))
                    .block(button),
                layout.restart,
            );
        }

        self.render_confetti(f.buffer_mut(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn setup(welcome: bool) -> (TicTacToe, Context, UnboundedReceiver<SoundCue>) {
        let config = Config {
            welcome,
            ..Config::default()
        };
        let (tx, rx) = unbounded_channel();
        let mut game = TicTacToe::with_seed(&config, 42);
        game.on_resize(80, 24);
        (game, Context { tx }, rx)
    }

    fn cues(rx: &mut UnboundedReceiver<SoundCue>) -> Vec<SoundCue> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    fn click(x: u16, y: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    #[test]
    fn welcome_enter_starts_the_game() {
        let (mut game, ctx, mut rx) = setup(true);
        assert_eq!(game.screen(), Screen::Welcome);
        assert_eq!(game.handle_event(key(KeyCode::Enter), &ctx), Flow::Continue);
        assert_eq!(game.screen(), Screen::Playing);
        assert!(!game.effects().transition.is_done());
        assert_eq!(cues(&mut rx), vec![SoundCue::Start]);
    }

    #[test]
    fn welcome_quit_item_quits() {
        let (mut game, ctx, _rx) = setup(true);
        game.handle_event(key(KeyCode::Down), &ctx);
        assert_eq!(game.handle_event(key(KeyCode::Enter), &ctx), Flow::Quit);
    }

    #[test]
    fn clicks_place_marks() {
        let (mut game, ctx, mut rx) = setup(false);
        game.handle_event(click(40, 11), &ctx);
        assert_eq!(game.state().cell(1, 1), Some(Mark::X));
        game.handle_event(click(24, 5), &ctx);
        assert_eq!(game.state().cell(0, 0), Some(Mark::O));
        assert_eq!(cues(&mut rx), vec![SoundCue::MoveX, SoundCue::MoveO]);
    }

    #[test]
    fn click_on_taken_cell_is_silent() {
        let (mut game, ctx, mut rx) = setup(false);
        game.handle_event(click(40, 11), &ctx);
        let _ = cues(&mut rx);
        game.handle_event(click(40, 11), &ctx);
        assert_eq!(game.state().turn(), Player::O);
        assert!(cues(&mut rx).is_empty());
    }

    #[test]
    fn winning_by_keys_cues_win_and_confetti() {
        let (mut game, ctx, mut rx) = setup(false);
        for d in ['1', '5', '2', '9', '3'] {
            game.handle_event(key(KeyCode::Char(d)), &ctx);
        }
        assert_eq!(game.state().winner(), Some(Player::X));
        assert!(!game.effects().confetti.is_empty());
        assert_eq!(cues(&mut rx).last(), Some(&SoundCue::Win));
    }

    #[test]
    fn restart_button_resets_board_and_effects() {
        let (mut game, ctx, mut rx) = setup(false);
        for d in ['1', '5', '2', '9', '3'] {
            game.handle_event(key(KeyCode::Char(d)), &ctx);
        }
        let restart = game.layout().restart;
        game.handle_event(click(restart.x + 1, restart.y + 1), &ctx);
        assert_eq!(game.state(), &GameState::new());
        assert!(game.effects().confetti.is_empty());
        assert!(!game.effects().glow.is_active());
        assert_eq!(cues(&mut rx).last(), Some(&SoundCue::Restart));
    }

    #[test]
    fn cursor_moves_and_places() {
        let (mut game, ctx, _rx) = setup(false);
        game.handle_event(key(KeyCode::Up), &ctx);
        game.handle_event(key(KeyCode::Up), &ctx);
        game.handle_event(key(KeyCode::Left), &ctx);
        assert_eq!(game.cursor(), (0, 0));
        game.handle_event(key(KeyCode::Enter), &ctx);
        assert_eq!(game.state().cell(0, 0), Some(Mark::X));
    }

    #[test]
    fn ticks_fade_the_glow() {
        let (mut game, ctx, _rx) = setup(false);
        game.handle_event(key(KeyCode::Char('5')), &ctx);
        assert!(game.effects().glow.is_active());
        game.on_tick(10_000, &ctx);
        assert!(!game.effects().glow.is_active());
    }
}
