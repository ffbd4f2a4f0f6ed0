//! TUI Application - main event loop and terminal management
//!
//! This module contains the core TUI application logic including:
//! - Terminal setup and restoration
//! - Route handling behind the session gate
//! - Event loop for keyboard input and pipeline deadlines
//! - Surface switching between the five dashboard views

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::Rng;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use tokio::time::Instant;

use crate::config::Settings;
use crate::fixtures::FixtureStore;
use crate::ingest::{self, IngestPhase};
use crate::models::{ChatRole, RetrievalRecord};
use crate::responder;
use crate::routes::Route;
use crate::session::SessionGate;
use crate::views::{
    AnomalyView, CategoryFilter, ChatView, HomeView, RelationshipView, TimelineView,
    THINKING_DELAY_MAX, THINKING_DELAY_MIN,
};

use super::theme::Palette;
use super::views::{self as surface, LoginForm};

/// Keyboard poll cadence for the cooperative loop.
const POLL_TICK: Duration = Duration::from_millis(50);

/// Outstanding deadlines owned by the surfaces.
///
/// Each pipeline arms at most one deadline at a time and clears it before
/// arming the next, so tick N+1 can never fire before tick N's effect is
/// applied. Navigating away from a surface drops that surface's deadlines.
#[derive(Debug, Default)]
struct Timers {
    /// Next upload progress tick (home surface)
    upload_tick: Option<Instant>,
    /// Next processing stage tick (home surface)
    stage_tick: Option<Instant>,
    /// Pending done-screen navigation to the dashboard (home surface)
    dashboard_nav: Option<Instant>,
    /// Pending assistant reply: fire time plus the submitted query (chat)
    chat_delivery: Option<(Instant, String)>,
}

impl Timers {
    fn next_deadline(&self) -> Option<Instant> {
        [
            self.upload_tick,
            self.stage_tick,
            self.dashboard_nav,
            self.chat_delivery.as_ref().map(|(t, _)| *t),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    fn clear_home(&mut self) {
        self.upload_tick = None;
        self.stage_tick = None;
        self.dashboard_nav = None;
    }

    fn clear_chat(&mut self) {
        self.chat_delivery = None;
    }
}

/// TUI application state.
pub struct TuiApp {
    settings: Settings,
    palette: Palette,
    fixtures: FixtureStore,
    session: SessionGate,
    route: Route,
    timers: Timers,
    should_quit: bool,

    /// Requested start route, honored after sign-in.
    pending_route: Option<Route>,

    login: LoginForm,
    home: HomeView,
    chat: ChatView,
    relationships: RelationshipView,
    timeline: TimelineView,
    anomalies: AnomalyView,

    /// File-name entry line on the home surface, when open.
    file_prompt: Option<String>,

    // List cursors for keyboard navigation.
    node_cursor: usize,
    event_cursor: usize,
    anomaly_cursor: usize,
    citation_cursor: usize,
}

impl TuiApp {
    pub fn new(settings: Settings, fixtures: FixtureStore, pending_route: Option<Route>) -> Self {
        let default_storyline = fixtures
            .timeline
            .storylines
            .first()
            .map(|s| s.id.clone())
            .unwrap_or_default();
        Self {
            palette: Palette::for_theme(settings.theme),
            settings,
            fixtures,
            session: SessionGate::new(),
            route: Route::Landing,
            timers: Timers::default(),
            should_quit: false,
            pending_route,
            login: LoginForm::new(),
            home: HomeView::new(),
            chat: ChatView::new(),
            relationships: RelationshipView::new(),
            timeline: TimelineView::new(default_storyline),
            anomalies: AnomalyView::new(),
            file_prompt: None,
            node_cursor: 0,
            event_cursor: 0,
            anomaly_cursor: 0,
            citation_cursor: 0,
        }
    }

    /// Switch surfaces, applying the access rules and tearing down any
    /// deadlines owned by the surface being left.
    fn navigate(&mut self, requested: Route) {
        let resolved = Route::resolve(requested, self.session.is_authenticated());
        if resolved == self.route {
            return;
        }
        match self.route {
            Route::Home => {
                // The run dies with its surface, original-style: timers
                // dropped first so a stale tick can never land.
                self.timers.clear_home();
                self.home.run = ingest::IngestRun::new();
                self.file_prompt = None;
            }
            Route::Dashboard => {
                self.timers.clear_chat();
                self.chat.cancel_pending();
            }
            _ => {}
        }
        tracing::debug!(from = %self.route, to = %resolved, "navigate");
        self.route = resolved;
    }

    fn logout(&mut self) {
        self.session.clear();
        self.navigate(Route::Landing);
    }

    /// Dashboard surfaces in Tab order.
    const SURFACES: [Route; 4] = [
        Route::Dashboard,
        Route::Relationships,
        Route::Timeline,
        Route::Anomalies,
    ];

    fn cycle_surface(&mut self, forward: bool) {
        let Some(pos) = Self::SURFACES.iter().position(|r| *r == self.route) else {
            self.navigate(Route::Dashboard);
            return;
        };
        let len = Self::SURFACES.len();
        let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
        self.navigate(Self::SURFACES[next]);
    }

    // ----- timers -------------------------------------------------------

    /// Apply every due deadline. Each arm clears its deadline before
    /// arming a successor.
    fn fire_due_timers(&mut self) {
        let now = Instant::now();

        if self.timers.upload_tick.is_some_and(|t| now >= t) {
            self.timers.upload_tick = None;
            let increment = rand::thread_rng().gen_range(ingest::UPLOAD_INCREMENT_RANGE);
            self.home.run.tick_upload(increment);
            match self.home.run.phase {
                IngestPhase::Uploading => {
                    self.timers.upload_tick = Some(now + self.settings.upload_tick);
                }
                IngestPhase::Processing => {
                    self.timers.stage_tick = Some(now + self.settings.stage_tick);
                }
                _ => {}
            }
        }

        if self.timers.stage_tick.is_some_and(|t| now >= t) {
            self.timers.stage_tick = None;
            self.home.run.tick_stage();
            match self.home.run.phase {
                IngestPhase::Processing => {
                    self.timers.stage_tick = Some(now + self.settings.stage_tick);
                }
                IngestPhase::Done => {
                    self.timers.dashboard_nav = Some(now + ingest::DONE_NAVIGATE_DELAY);
                }
                _ => {}
            }
        }

        if self.timers.dashboard_nav.is_some_and(|t| now >= t) {
            self.timers.dashboard_nav = None;
            self.navigate(Route::Dashboard);
        }

        if self.timers.chat_delivery.as_ref().is_some_and(|(t, _)| now >= *t) {
            if let Some((_, query)) = self.timers.chat_delivery.take() {
                let reply = responder::respond(&self.fixtures.retrieval.results, &query);
                self.chat.deliver(reply);
                self.citation_cursor = 0;
            }
        }
    }

    // ----- keyboard -----------------------------------------------------

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.route {
            Route::Landing => self.handle_login_key(key.code),
            Route::Home => self.handle_home_key(key.code),
            Route::Dashboard => self.handle_chat_key(key.code),
            Route::Relationships => self.handle_graph_key(key.code),
            Route::Timeline => self.handle_timeline_key(key.code),
            Route::Anomalies => self.handle_anomaly_key(key.code),
            Route::NotFound => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => self.navigate(Route::Home),
            },
        }
    }

    fn handle_login_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => self.login.next_field(),
            KeyCode::Backspace => self.login.backspace(),
            KeyCode::Char(c) => self.login.push_char(c),
            KeyCode::Enter => {
                let ok = self
                    .session
                    .challenge(&self.login.email, &self.login.credential);
                if ok {
                    self.login.clear_error();
                    let target = self.pending_route.take().unwrap_or(Route::Home);
                    self.navigate(target);
                } else {
                    // Unified failure: nothing distinguishes unknown email
                    // from wrong credential.
                    self.login.set_error("Invalid credentials");
                }
            }
            _ => {}
        }
    }

    fn handle_home_key(&mut self, code: KeyCode) {
        // File-name entry line has focus while open.
        if let Some(prompt) = self.file_prompt.as_mut() {
            match code {
                KeyCode::Esc => self.file_prompt = None,
                KeyCode::Backspace => {
                    prompt.pop();
                }
                KeyCode::Char(c) => prompt.push(c),
                KeyCode::Enter => {
                    let name = prompt.trim().to_string();
                    if !name.is_empty() {
                        self.start_ingest(name);
                    }
                    self.file_prompt = None;
                }
                _ => {}
            }
            return;
        }
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('o') => self.logout(),
            KeyCode::Char('u') => self.file_prompt = Some(String::new()),
            KeyCode::Char('j') | KeyCode::Down => self.home.select_next_case(),
            KeyCode::Char('k') | KeyCode::Up => self.home.select_previous_case(),
            KeyCode::Enter | KeyCode::Tab => self.navigate(Route::Dashboard),
            _ => {}
        }
    }

    /// Begin a (possibly re-entrant) simulated run: previous deadlines are
    /// dropped before the restarted run arms its first tick.
    fn start_ingest(&mut self, file_name: String) {
        if !ingest::IngestRun::has_accepted_suffix(&file_name) {
            // Advisory only, matching the picker filter.
            tracing::warn!(file = %file_name, "file suffix outside the picker filter");
        }
        self.timers.clear_home();
        self.home.run.begin(file_name);
        self.timers.upload_tick = Some(Instant::now() + self.settings.upload_tick);
    }

    fn handle_chat_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Tab => self.cycle_surface(true),
            KeyCode::BackTab => self.cycle_surface(false),
            KeyCode::Esc => {
                if self.chat.input.is_empty() {
                    self.navigate(Route::Home);
                } else {
                    self.chat.input.clear();
                }
            }
            KeyCode::Backspace => {
                self.chat.input.pop();
            }
            KeyCode::Up => self.citation_cursor = self.citation_cursor.saturating_sub(1),
            KeyCode::Down => {
                let len = self.current_citations().len();
                if len > 0 {
                    self.citation_cursor = (self.citation_cursor + 1).min(len - 1);
                }
            }
            KeyCode::Enter => {
                if self.chat.input.is_empty() {
                    if let Some(cite) = self.current_citations().get(self.citation_cursor) {
                        let id = cite.id.clone();
                        self.chat.toggle_citation(&id);
                    }
                } else {
                    let text = self.chat.input.clone();
                    if let Some(query) = self.chat.submit(&text) {
                        self.chat.input.clear();
                        let delay_ms = rand::thread_rng().gen_range(
                            THINKING_DELAY_MIN.as_millis() as u64
                                ..THINKING_DELAY_MAX.as_millis() as u64,
                        );
                        self.timers.chat_delivery =
                            Some((Instant::now() + Duration::from_millis(delay_ms), query));
                    }
                }
            }
            KeyCode::Char(c) => self.chat.input.push(c),
            _ => {}
        }
    }

    /// Citations of the most recent assistant turn, the set the cursor
    /// walks over.
    fn current_citations(&self) -> &[RetrievalRecord] {
        self.chat
            .turns()
            .iter()
            .rev()
            .find(|t| t.role == ChatRole::Assistant)
            .map(|t| t.citations.as_slice())
            .unwrap_or(&[])
    }

    fn handle_graph_key(&mut self, code: KeyCode) {
        let node_count = self.fixtures.graph.nodes.len();
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.cycle_surface(true),
            KeyCode::BackTab => self.cycle_surface(false),
            KeyCode::Esc => {
                if self.relationships.selected.is_some() {
                    self.relationships.clear_selection();
                } else {
                    self.navigate(Route::Home);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if node_count > 0 {
                    self.node_cursor = (self.node_cursor + 1).min(node_count - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.node_cursor = self.node_cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(node) = self.fixtures.graph.nodes.get(self.node_cursor) {
                    let id = node.id.clone();
                    self.relationships.select_node(&id);
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.relationships.zoom_in(),
            KeyCode::Char('-') => self.relationships.zoom_out(),
            _ => {}
        }
    }

    fn handle_timeline_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.cycle_surface(true),
            KeyCode::BackTab => self.cycle_surface(false),
            KeyCode::Esc => self.navigate(Route::Home),
            KeyCode::Char('s') => {
                let storylines = &self.fixtures.timeline.storylines;
                if let Some(pos) = storylines.iter().position(|s| s.id == self.timeline.storyline) {
                    let next = &storylines[(pos + 1) % storylines.len()];
                    let id = next.id.clone();
                    self.timeline.select_storyline(&id);
                    self.event_cursor = 0;
                }
            }
            KeyCode::Char('n') => self.timeline.toggle_mode(),
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.fixtures.timeline.events_for(&self.timeline.storyline).len();
                if len > 0 {
                    self.event_cursor = (self.event_cursor + 1).min(len - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.event_cursor = self.event_cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                let events = self.fixtures.timeline.events_for(&self.timeline.storyline);
                if let Some(event) = events.get(self.event_cursor) {
                    let id = event.id.clone();
                    self.timeline.toggle_event(&id);
                }
            }
            _ => {}
        }
    }

    fn handle_anomaly_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.cycle_surface(true),
            KeyCode::BackTab => self.cycle_surface(false),
            KeyCode::Esc => self.navigate(Route::Home),
            KeyCode::Char('f') => {
                self.anomalies.set_filter(next_filter(self.anomalies.filter));
                self.anomaly_cursor = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self
                    .anomalies
                    .filtered(&self.fixtures.anomalies.anomalies)
                    .len();
                if len > 0 {
                    self.anomaly_cursor = (self.anomaly_cursor + 1).min(len - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.anomaly_cursor = self.anomaly_cursor.saturating_sub(1);
            }
            KeyCode::Enter => {
                let filtered = self.anomalies.filtered(&self.fixtures.anomalies.anomalies);
                if let Some(finding) = filtered.get(self.anomaly_cursor) {
                    let id = finding.id.clone();
                    self.anomalies.toggle_expand(&id);
                }
            }
            _ => {}
        }
    }

    // ----- rendering ----------------------------------------------------

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if self.route == Route::Landing {
            surface::login::render(frame, area, &self.login, &self.palette);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title bar
                Constraint::Min(5),    // Surface content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        self.render_title_bar(frame, chunks[0]);
        match self.route {
            Route::Landing => {}
            Route::Home => surface::home::render(
                frame,
                chunks[1],
                &self.home,
                self.file_prompt.as_deref(),
                self.session.current(),
                &self.palette,
            ),
            Route::Dashboard => surface::chat::render(
                frame,
                chunks[1],
                &self.chat,
                self.citation_cursor,
                &self.palette,
            ),
            Route::Relationships => surface::relationships::render(
                frame,
                chunks[1],
                &self.fixtures.graph,
                &self.relationships,
                self.node_cursor,
                &self.palette,
            ),
            Route::Timeline => surface::timeline::render(
                frame,
                chunks[1],
                &self.fixtures.timeline,
                &self.timeline,
                self.event_cursor,
                &self.palette,
            ),
            Route::Anomalies => surface::anomalies::render(
                frame,
                chunks[1],
                &self.fixtures.anomalies,
                &self.anomalies,
                self.anomaly_cursor,
                &self.palette,
            ),
            Route::NotFound => surface::not_found::render(frame, chunks[1], &self.palette),
        }
        self.render_status_bar(frame, chunks[2]);
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let tab = |route: Route, label: &'static str| {
            let style = if self.route == route {
                Style::default().fg(self.palette.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.palette.muted)
            };
            Span::styled(label, style)
        };

        let mut spans = vec![
            Span::styled(
                " FORENSIQ ",
                Style::default().fg(self.palette.accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw("| "),
            tab(Route::Home, "Home"),
            Span::raw("  "),
            tab(Route::Dashboard, "NLIQ Chat"),
            Span::raw("  "),
            tab(Route::Relationships, "Relationships"),
            Span::raw("  "),
            tab(Route::Timeline, "Timeline"),
            Span::raw("  "),
            tab(Route::Anomalies, "Anomalies"),
        ];
        if let Some(identity) = self.session.current() {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                format!("[{}] {}", identity.avatar, identity.name),
                Style::default().fg(self.palette.fg),
            ));
        }

        let title = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.palette.border)),
        );
        frame.render_widget(title, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let hints = match self.route {
            Route::Landing => "",
            Route::Home => " u:Upload  j/k:Cases  Enter/Tab:Dashboard  o:Logout  q:Quit",
            Route::Dashboard => {
                " Type+Enter:Ask  Up/Down:Citations  Enter(empty):Expand  Tab:Next  Esc:Home"
            }
            Route::Relationships => {
                " j/k:Nodes  Enter:Select  +/-:Zoom  Tab:Next  Esc:Clear/Home  q:Quit"
            }
            Route::Timeline => {
                " s:Storyline  n:Narrative  j/k:Events  Enter:Expand  Tab:Next  q:Quit"
            }
            Route::Anomalies => " f:Filter  j/k:Findings  Enter:Expand  Tab:Next  q:Quit",
            Route::NotFound => " Any key: go home  q:Quit",
        };
        let status = Paragraph::new(hints).style(Style::default().fg(self.palette.muted));
        frame.render_widget(status, area);
    }
}

fn next_filter(current: CategoryFilter) -> CategoryFilter {
    use crate::models::AnomalyCategory as A;
    match current {
        CategoryFilter::All => CategoryFilter::Only(A::Temporal),
        CategoryFilter::Only(A::Temporal) => CategoryFilter::Only(A::Linguistic),
        CategoryFilter::Only(A::Linguistic) => CategoryFilter::Only(A::Data),
        CategoryFilter::Only(A::Data) => CategoryFilter::Only(A::Network),
        CategoryFilter::Only(A::Network) => CategoryFilter::All,
    }
}

/// Setup the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// File-backed logging so the alternate screen stays clean. The guard
/// must live for the whole session.
fn init_file_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = dirs::data_local_dir()?.join("forensiq");
    std::fs::create_dir_all(&dir).ok()?;
    let appender = tracing_appender::rolling::never(dir, "fq-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = tracing_subscriber::EnvFilter::try_from_env("FQ_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(guard)
}

/// Run the dashboard.
///
/// `start_path` is an optional route path to open after sign-in; unknown
/// paths land on the not-found surface.
///
/// # Errors
/// Returns an error if the fixtures fail validation or the terminal
/// cannot be initialized.
pub fn run_tui(settings: Settings, start_path: Option<&str>) -> crate::Result<()> {
    let fixtures = FixtureStore::load()?;
    let _log_guard = init_file_logging();
    let pending_route = start_path.map(Route::parse);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let mut app = TuiApp::new(settings, fixtures, pending_route);
        let mut terminal = setup_terminal()?;
        let result = event_loop(&mut app, &mut terminal).await;
        restore_terminal()?;
        result
    })
}

async fn event_loop(
    app: &mut TuiApp,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> crate::Result<()> {
    loop {
        app.fire_due_timers();
        terminal.draw(|f| app.render(f))?;

        // Wake for whichever comes first: the keyboard poll tick or the
        // earliest surface deadline.
        match app.timers.next_deadline() {
            Some(deadline) => {
                tokio::select! {
                    _ = tokio::time::sleep(POLL_TICK) => poll_keyboard(app)?,
                    _ = tokio::time::sleep_until(deadline) => {}
                }
            }
            None => {
                tokio::time::sleep(POLL_TICK).await;
                poll_keyboard(app)?;
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn poll_keyboard(app: &mut TuiApp) -> crate::Result<()> {
    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}
