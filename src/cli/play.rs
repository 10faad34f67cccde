//! Play command implementation - Interactive TUI game.

// Terminal geometry is u16; grid sizes and counters are small
#![allow(clippy::needless_pass_by_value, clippy::cast_possible_truncation)]

use super::{CliError, DataPaths};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use silhouette::geo::projection::rasterize;
use silhouette::leaderboard::timestamp_now;
use silhouette::{
    CountryId, GameConfig, Leaderboard, RoundStatus, RunMode, Session, StatusMessage, Suggestion, Tone,
};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the datasets cannot be loaded or the TUI fails.
pub(crate) fn execute(
    data: &DataPaths,
    seed: Option<u64>,
    mode: RunMode,
    guesses: u8,
    delay: u64,
    name: Option<String>,
) -> Result<(), CliError> {
    let atlas = Arc::new(data.load_atlas()?);

    // Generate seed if not provided
    let seed = seed.unwrap_or_else(rand::random);

    let config = GameConfig {
        max_guesses: guesses,
        mode,
        next_round_delay: Duration::from_millis(delay),
        ..GameConfig::default()
    };
    let session = Session::new(atlas, config, ChaCha8Rng::seed_from_u64(seed))?;
    let leaderboard = Leaderboard::load(&data.leaderboard);

    let app = App::new(session, seed, leaderboard, data.leaderboard.clone(), name);
    let app = run_tui(app)?;

    println!("Seed: {}", app.seed);
    if let Some(rank) = app.best_rank {
        println!("Leaderboard rank: #{rank} ({})", data.leaderboard.display());
    }
    Ok(())
}

/// App state for the TUI.
struct App {
    session: Session<ChaCha8Rng>,
    seed: u64,
    input: String,
    suggestions: Vec<Suggestion>,
    highlighted: Option<usize>,
    selected: Option<CountryId>,
    notice: Option<StatusMessage>,
    leaderboard: Leaderboard,
    leaderboard_path: PathBuf,
    player_name: Option<String>,
    run_recorded: bool,
    best_rank: Option<usize>,
}

impl App {
    fn new(
        session: Session<ChaCha8Rng>,
        seed: u64,
        leaderboard: Leaderboard,
        leaderboard_path: PathBuf,
        player_name: Option<String>,
    ) -> Self {
        Self {
            session,
            seed,
            input: String::new(),
            suggestions: Vec::new(),
            highlighted: None,
            selected: None,
            notice: None,
            leaderboard,
            leaderboard_path,
            player_name,
            run_recorded: false,
            best_rank: None,
        }
    }

    fn status(&self) -> &StatusMessage {
        self.notice.as_ref().unwrap_or_else(|| self.session.status())
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.selected = None;
        self.suggestions.clear();
        self.highlighted = None;
    }

    fn edited(&mut self) {
        self.selected = None;
        self.notice = None;
        self.highlighted = None;
        self.suggestions = if self.input.trim().is_empty() {
            Vec::new()
        } else {
            self.session.suggestions(&self.input)
        };
    }

    fn move_highlight(&mut self, down: bool) {
        let count = self.suggestions.len();
        if count == 0 {
            return;
        }
        self.highlighted = Some(match (self.highlighted, down) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        });
    }

    fn accept_suggestion(&mut self) {
        let Some(suggestion) = self.suggestions.get(self.highlighted.unwrap_or(0)).cloned() else {
            return;
        };
        self.input = suggestion.name;
        self.selected = Some(suggestion.id);
        self.suggestions.clear();
        self.highlighted = None;
        self.notice = Some(StatusMessage::new(
            Tone::Info,
            "Country selected. Press Enter to lock in your guess.",
        ));
    }

    fn submit(&mut self) {
        if self.highlighted.is_some() {
            self.accept_suggestion();
            return;
        }
        self.notice = None;
        // Rejections are reported through the session status line
        if self.session.submit(&self.input, self.selected, Instant::now()).is_ok() {
            self.clear_input();
        }
        self.record_run();
    }

    fn new_round(&mut self) {
        let restarts_run = self.session.run().is_some_and(|run| run.is_over());
        self.session.start_new_round();
        if restarts_run {
            self.run_recorded = false;
        }
        self.clear_input();
        self.notice = None;
        // Forfeiting the last life ends the run here
        self.record_run();
    }

    fn restart_run(&mut self) {
        self.session.restart_run();
        self.run_recorded = false;
        self.clear_input();
        self.notice = None;
    }

    fn tick(&mut self) {
        if self.session.tick(Instant::now()) {
            self.clear_input();
            self.notice = None;
        }
    }

    /// Offer a finished run to the leaderboard, once per run.
    fn record_run(&mut self) {
        if self.run_recorded {
            return;
        }
        let Some(entry) = self.session.leaderboard_entry(self.player_name.as_deref(), timestamp_now()) else {
            return;
        };
        self.run_recorded = true;

        let Some(rank) = self.leaderboard.insert(entry) else {
            return;
        };
        self.best_rank = Some(self.best_rank.map_or(rank, |best| best.min(rank)));
        let text = match self.leaderboard.save(&self.leaderboard_path) {
            Ok(()) => format!("{} Leaderboard rank #{rank}.", self.session.status().text),
            Err(e) => format!("{} Could not save leaderboard: {e}", self.session.status().text),
        };
        self.notice = Some(StatusMessage::new(self.session.status().tone, text));
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('c') if ctrl => return false,
            KeyCode::Char('n') if ctrl => self.new_round(),
            KeyCode::Char('r') if ctrl => self.restart_run(),
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                self.edited();
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.edited();
            }
            KeyCode::Down => self.move_highlight(true),
            KeyCode::Up => self.move_highlight(false),
            KeyCode::Tab => self.accept_suggestion(),
            KeyCode::Enter => self.submit(),
            _ => {}
        }
        true
    }
}

fn run_tui(mut app: App) -> Result<App, CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result.map(|()| app)
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), CliError> {
    loop {
        // Draw
        terminal.draw(|f| ui(f, app)).map_err(|e| CliError::new(e.to_string()))?;

        // Start the scheduled round if it is due
        app.tick();

        // Handle input with timeout
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.handle_key(key)
        {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Silhouette and guesses
            Constraint::Length(3), // Input
            Constraint::Length(3), // Status
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_silhouette(f, main_chunks[0], app);
    render_guesses(f, main_chunks[1], app);
    render_input(f, chunks[2], app);
    render_status(f, chunks[3], app);
    render_footer(f, chunks[4], app);

    // Suggestions float over the main area, just above the input
    render_suggestions(f, chunks[1], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let session = &app.session;
    let mut title = format!(" Silhouette | Round {} | {}", session.round_number(), session.config().mode);
    if let Some(run) = session.run() {
        title.push_str(&format!(" | Score: {} | Lives: {}", run.score(), run.lives_remaining()));
        if run.is_over() {
            title.push_str(" | RUN OVER");
        }
    }
    title.push_str(&format!(" | Seed: {} ", app.seed));

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_silhouette(f: &mut Frame, area: Rect, app: &App) {
    let round = app.session.round();
    let cols = usize::from(area.width.saturating_sub(2));
    let rows = usize::from(area.height.saturating_sub(2));

    let color = match round.status() {
        RoundStatus::Playing => Color::White,
        RoundStatus::Won => Color::Green,
        RoundStatus::Lost => Color::Red,
    };

    let lines: Vec<Line> = app
        .session
        .target()
        .map(|target| rasterize(&target.geometry, cols, rows))
        .unwrap_or_default()
        .into_iter()
        .map(|row| Line::from(Span::styled(row, Style::default().fg(color))))
        .collect();

    let title = match (round.status(), app.session.target()) {
        (RoundStatus::Playing, _) | (_, None) => " Which country is this? ".to_string(),
        (_, Some(target)) => format!(" {} ", target.name),
    };

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(widget, area);
}

fn render_guesses(f: &mut Frame, area: Rect, app: &App) {
    let round = app.session.round();
    let mut lines = vec![Line::from("")];

    for (i, guess) in round.guesses().iter().enumerate() {
        let (mark, color) = if guess.correct {
            ("✓", Color::Green)
        } else {
            ("✗", Color::Yellow)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {mark} "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw(format!("{}. {:<20}", i + 1, guess.display_name)),
            Span::styled(
                format!(" {:>10} {} {}", guess.distance_text, guess.direction_arrow(), guess.direction_label()),
                Style::default().fg(Color::Cyan),
            ),
        ]));
    }

    for i in round.guesses().len()..usize::from(round.max_guesses()) {
        lines.push(Line::from(Span::styled(
            format!("   {}. ...", i + 1),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let title = format!(" Guesses ({} left) ", round.guesses_remaining());
    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(widget, area);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let style = if app.session.round().is_playing() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let widget = Paragraph::new(app.input.as_str())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" Your guess "));
    f.render_widget(widget, area);

    let cursor_x = area.x + 1 + app.input.chars().count().min(usize::from(area.width.saturating_sub(3))) as u16;
    f.set_cursor_position((cursor_x, area.y + 1));
}

fn render_suggestions(f: &mut Frame, area: Rect, app: &App) {
    if app.suggestions.is_empty() {
        return;
    }
    let height = (app.suggestions.len() as u16 + 2).min(area.height);
    let width = area.width.min(40);
    let popup = Rect::new(area.x, area.y + area.height - height, width, height);

    let lines: Vec<Line> = app
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, suggestion)| {
            let style = if app.highlighted == Some(i) {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!(" {} ", suggestion.name), style))
        })
        .collect();

    f.render_widget(ratatui::widgets::Clear, popup);
    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Suggestions "));
    f.render_widget(widget, popup);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let status = app.status();
    let color = match status.tone {
        Tone::Info => Color::White,
        Tone::Success => Color::Green,
        Tone::Warning => Color::Yellow,
        Tone::Error => Color::Red,
    };

    let mut text = status.text.clone();
    if let Some(wait) = app.session.next_round_in(Instant::now()) {
        text.push_str(&format!(" Next round in {:.1}s.", wait.as_secs_f64()));
    }

    let widget = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.session.run().is_some() {
        " [Enter] Guess  [Tab/↑/↓] Suggestions  [Ctrl-N] Skip (costs a life)  [Ctrl-R] Restart run  [Esc] Quit "
    } else {
        " [Enter] Guess  [Tab/↑/↓] Suggestions  [Ctrl-N] New round  [Esc] Quit "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
