use crate::controller::{Directory, LoadTicket};
use crate::criteria::{FeeFilter, Presence};
use crate::input::{Dispatch, InputBinding, InputEvent};
use crate::language::{Language, UiStrings};
use crate::loader::{DataSource, LoadError};
use crate::maplink::{open_map, BrowserLauncher, SystemBrowser};
use crate::record::BeachRecord;
use crate::render::{fee_badge, lifeguard_badge, shower_badge, Badge, BadgeKind};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

type LoadResult = (LoadTicket, Result<Vec<BeachRecord>, LoadError>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

pub struct App {
    pub directory: Directory,
    pub binding: InputBinding,
    pub visible: Vec<BeachRecord>,
    pub state: TableState,
    pub show_detail: bool,
    pub mode: InputMode,
    pub popup: Option<String>,
    source: Arc<dyn DataSource>,
    launcher: Box<dyn BrowserLauncher>,
    tx: Sender<LoadResult>,
    rx: Receiver<LoadResult>,
}

impl App {
    pub fn new(language: Language, source: Arc<dyn DataSource>) -> Self {
        Self::with_launcher(language, source, Box::new(SystemBrowser))
    }

    pub fn with_launcher(
        language: Language,
        source: Arc<dyn DataSource>,
        launcher: Box<dyn BrowserLauncher>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut app = Self {
            directory: Directory::new(language),
            binding: InputBinding::bind_all(),
            visible: Vec::new(),
            state: TableState::default(),
            show_detail: false,
            mode: InputMode::Normal,
            popup: None,
            source,
            launcher,
            tx,
            rx,
        };

        let ticket = app.directory.begin_load(language);
        app.spawn_load(ticket);
        app
    }

    fn spawn_load(&self, ticket: LoadTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = source.load(ticket.language);
            // Receiver gone means the app already quit
            let _ = tx.send((ticket, result));
        });
    }

    /// Apply finished loads; true if anything changed on screen
    pub fn poll_loads(&mut self) -> bool {
        let mut changed = false;
        while let Ok((ticket, result)) = self.rx.try_recv() {
            let outcome = self.directory.complete_load(ticket, result);
            debug!(?outcome, seq = ticket.seq, "load finished");
            changed = true;
        }
        if changed {
            self.refresh();
        }
        changed
    }

    pub fn strings(&self) -> &'static UiStrings {
        self.directory.strings()
    }

    /// Re-run the filter and reset selection to the first row
    pub fn refresh(&mut self) {
        self.visible = self.directory.visible();
        if self.visible.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn dispatch(&mut self, event: InputEvent) {
        match self.binding.handle(&mut self.directory, event) {
            Dispatch::Ignored => {}
            Dispatch::Rerender => self.refresh(),
            Dispatch::Reload(ticket) => {
                self.spawn_load(ticket);
                self.refresh();
            }
        }
    }

    pub fn selected_beach(&self) -> Option<&BeachRecord> {
        self.state.selected().and_then(|i| self.visible.get(i))
    }

    pub fn open_selected_map(&mut self) {
        let Some(beach) = self.selected_beach() else {
            return;
        };
        if let Err(err) = open_map(beach, self.launcher.as_ref()) {
            self.popup = Some(err.user_message(self.strings()));
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    /// Returns false when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.popup.is_some() {
            self.popup = None;
            return true;
        }

        if self.mode == InputMode::Search {
            let mut term = self.directory.criteria().search_term.clone();
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.mode = InputMode::Normal,
                KeyCode::Backspace => {
                    term.pop();
                    self.dispatch(InputEvent::SearchChanged(term));
                }
                KeyCode::Char(c) => {
                    term.push(c);
                    self.dispatch(InputEvent::SearchChanged(term));
                }
                _ => {}
            }
            return true;
        }

        let criteria = self.directory.criteria().clone();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char('/') => self.mode = InputMode::Search,
            KeyCode::Char('l') => self.dispatch(InputEvent::LifeguardChanged(criteria.lifeguard.next())),
            KeyCode::Char('s') => self.dispatch(InputEvent::ShowerChanged(criteria.shower.next())),
            KeyCode::Char('f') => self.dispatch(InputEvent::FeeChanged(criteria.fee.next())),
            KeyCode::Char('r') => self.dispatch(InputEvent::Reset),
            KeyCode::Char('t') => self.dispatch(InputEvent::ToggleLanguage),
            KeyCode::Char('o') => self.open_selected_map(),
            KeyCode::Enter => self.toggle_detail(),
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::Home => {
                if !self.visible.is_empty() {
                    self.state.select(Some(0));
                }
            }
            KeyCode::End => {
                if !self.visible.is_empty() {
                    self.state.select(Some(self.visible.len() - 1));
                }
            }
            _ => {}
        }
        true
    }

    pub fn next(&mut self) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.visible.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 10).min(len - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let i = self.state.selected().map(|i| i.saturating_sub(10)).unwrap_or(0);
        self.state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    info!("terminal UI closed");
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        app.poll_loads();
        terminal.draw(|f| ui(f, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && !app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

// ============================================================================
// DRAWING
// ============================================================================

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Filters
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_filters(f, chunks[1], app);

    if app.show_detail {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);

        render_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        render_table(f, chunks[2], app);
    }

    render_status_bar(f, chunks[3], app);

    if let Some(message) = &app.popup {
        render_popup(f, message);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let s = app.strings();

    let count = if app.directory.is_loading() {
        Span::styled(s.loading, Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            format!("{}: {}", s.result_count, app.visible.len()),
            Style::default().fg(Color::White),
        )
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            s.heading,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            app.directory.language().tag(),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  |  "),
        count,
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn presence_label(value: Presence, s: &UiStrings) -> &'static str {
    match value {
        Presence::All => s.option_all,
        Presence::Yes => s.option_yes,
        Presence::No => s.option_no,
    }
}

fn fee_label(value: FeeFilter, s: &UiStrings) -> &'static str {
    match value {
        FeeFilter::All => s.option_all,
        FeeFilter::Free => s.option_free,
        FeeFilter::Paid => s.option_paid,
    }
}

fn render_filters(f: &mut Frame, area: Rect, app: &App) {
    let s = app.strings();
    let criteria = app.directory.criteria();
    let key = Style::default().fg(Color::Yellow);
    let value = Style::default().fg(Color::Green);

    let search = if criteria.search_term.is_empty() && app.mode != InputMode::Search {
        Span::styled(s.search_placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(criteria.search_term.as_str(), Style::default().fg(Color::White))
    };

    let mut spans = vec![Span::styled("/ ", key), search];
    if app.mode == InputMode::Search {
        spans.push(Span::styled("▏", Style::default().fg(Color::White)));
    }
    spans.extend([
        Span::raw("  |  "),
        Span::raw(format!("{}: ", s.lifeguard_label)),
        Span::styled(presence_label(criteria.lifeguard, s), value),
        Span::raw("  "),
        Span::raw(format!("{}: ", s.shower_label)),
        Span::styled(presence_label(criteria.shower, s), value),
        Span::raw("  "),
        Span::raw(format!("{}: ", s.fee_label)),
        Span::styled(fee_label(criteria.fee, s), value),
    ]);

    let border = if app.mode == InputMode::Search {
        Color::Yellow
    } else {
        Color::White
    };
    let filters = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)));

    f.render_widget(filters, area);
}

fn badge_cell(badge: Badge) -> Cell<'static> {
    let color = match badge.kind {
        BadgeKind::Yes | BadgeKind::Free => Color::Green,
        BadgeKind::No => Color::Red,
        BadgeKind::Paid => Color::Yellow,
    };
    Cell::from(badge.label).style(Style::default().fg(color))
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let s = app.strings();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(format!(" {} ", s.page_title));

    if app.visible.is_empty() {
        let text = if app.directory.is_loading() {
            s.loading
        } else {
            s.no_results
        };
        let empty = Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header_cells = [
        s.col_name,
        s.col_address,
        s.col_open_time,
        s.col_lifeguard,
        s.col_shower,
        s.col_fee,
        s.col_note,
    ]
    .into_iter()
    .map(|h| Cell::from(h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.visible.iter().map(|beach| {
        Row::new(vec![
            Cell::from(truncate(&beach.name, 24)),
            Cell::from(truncate(&format!("{} · {}", beach.address, s.region), 30)),
            Cell::from(truncate(&beach.open_time, 18)),
            badge_cell(lifeguard_badge(beach, s)),
            badge_cell(shower_badge(beach, s)),
            badge_cell(fee_badge(beach, s)),
            Cell::from(truncate(&beach.note, 30)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(26),
            Constraint::Length(32),
            Constraint::Length(20),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(block)
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let s = app.strings();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(" {} ", s.col_name));

    let Some(beach) = app.selected_beach() else {
        f.render_widget(Paragraph::new(s.no_results).block(block), area);
        return;
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let field = |name: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {}: ", name), label),
            Span::raw(value),
        ])
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", beach.name),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field(s.col_address, format!("{} ({})", beach.address, s.region)),
        field(s.col_open_time, beach.open_time.clone()),
        field(s.col_lifeguard, lifeguard_badge(beach, s).label.to_string()),
        field(s.col_shower, shower_badge(beach, s).label.to_string()),
        field(s.col_fee, fee_badge(beach, s).label.to_string()),
        Line::from(""),
        field(s.col_note, beach.note.clone()),
    ];

    let detail = Paragraph::new(content).block(block).wrap(Wrap { trim: false });
    f.render_widget(detail, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);

    let status = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {}/{} ", selected, app.visible.len()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled(app.strings().key_help, Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status, area);
}

fn render_popup(f: &mut Frame, message: &str) {
    let area = centered_rect(70, 30, f.size());
    let popup = Paragraph::new(message.to_string())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
