//! TUI application state and event loop.
//!
//! The app mounts one [`Dashboard`] for its lifetime. The live feed runs on
//! the Tokio runtime; the render loop only reads through a [`ReadingView`]
//! and picks up a new reading whenever the cell's revision moves.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use meteolab_core::{Dashboard, DashboardConfig, Metric, ReadingView, SensorReading};

/// Input poll interval; also bounds how stale a drawn frame can be.
const FRAME: Duration = Duration::from_millis(50);

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// Top-level tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Station,
    Research,
    About,
}

impl View {
    pub const ALL: [View; 3] = [View::Station, View::Research, View::About];

    pub fn next(self) -> Self {
        match self {
            Self::Station => Self::Research,
            Self::Research => Self::About,
            Self::About => Self::Station,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Station => Self::About,
            Self::Research => Self::Station,
            Self::About => Self::Research,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Station => "Station",
            Self::Research => "Research",
            Self::About => "About",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Station => 0,
            Self::Research => 1,
            Self::About => 2,
        }
    }

    /// View for a number key (`1`-based).
    pub fn from_digit(c: char) -> Option<Self> {
        c.to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

// ---------------------------------------------------------------------------
// TrendMode
// ---------------------------------------------------------------------------

/// What the Station trend chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendMode {
    /// Temperature and humidity together.
    #[default]
    Climate,
    Single(Metric),
}

impl TrendMode {
    /// Climate first, then every metric on its own, then back to climate.
    pub fn next(self) -> Self {
        match self {
            Self::Climate => Self::Single(Metric::ALL[0]),
            Self::Single(m) if m == Metric::ALL[Metric::ALL.len() - 1] => Self::Climate,
            Self::Single(m) => Self::Single(m.next()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Climate => "Temperature & humidity",
            Self::Single(m) => m.label(),
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    dashboard: Dashboard,
    view: ReadingView,
    /// Reading shown on screen. Frozen while paused.
    current: Option<SensorReading>,
    seen_revision: u64,
    running: bool,
    paused: bool,
    active_view: View,
    trend: TrendMode,
    export_dir: PathBuf,
    /// Result of the last snapshot export, shown in the key bar.
    status: Option<String>,
}

impl App {
    /// Mount the dashboard.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn new(config: &DashboardConfig, export_dir: PathBuf) -> Self {
        let dashboard = Dashboard::mount(config);
        let view = dashboard.view();
        let (current, seen_revision) = view.snapshot();
        Self {
            dashboard,
            view,
            current,
            seen_revision,
            running: true,
            paused: false,
            active_view: View::default(),
            trend: TrendMode::default(),
            export_dir,
            status: None,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Restore the terminal before the panic message prints.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        let _ = std::panic::take_hook();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        if let Some(status) = &self.status {
            println!("{status}");
        }

        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while self.running {
            self.refresh_current();
            terminal.draw(|f| super::ui::draw(f, self))?;

            if event::poll(FRAME)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key.code);
            }
        }

        Ok(())
    }

    /// Pull the latest reading if the feed has written since the last frame.
    fn refresh_current(&mut self) -> bool {
        if self.paused {
            return false;
        }
        let revision = self.view.revision();
        if revision == self.seen_revision {
            return false;
        }
        let (current, revision) = self.view.snapshot();
        self.current = current;
        self.seen_revision = revision;
        true
    }

    pub(crate) fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Tab | KeyCode::Right => self.active_view = self.active_view.next(),
            KeyCode::BackTab | KeyCode::Left => self.active_view = self.active_view.prev(),
            KeyCode::Char(c @ '1'..='3') => {
                if let Some(v) = View::from_digit(c) {
                    self.active_view = v;
                }
            }
            KeyCode::Char('g') => self.trend = self.trend.next(),
            KeyCode::Char('p') => self.paused = !self.paused,
            KeyCode::Char('s') => self.export_snapshot(),
            _ => {}
        }
    }

    fn export_snapshot(&mut self) {
        let snapshot = self.dashboard.snapshot();
        self.status = Some(match snapshot.write_to_dir(&self.export_dir) {
            Ok(path) => format!("Snapshot saved to {}", path.display()),
            Err(e) => format!("Snapshot failed: {e}"),
        });
    }

    // --- Accessors for rendering ---

    pub fn history(&self) -> &[SensorReading] {
        self.dashboard.history()
    }

    pub fn current(&self) -> Option<&SensorReading> {
        self.current.as_ref()
    }

    /// Change of `metric` in the live reading since mount.
    pub fn live_delta(&self, metric: Metric) -> Option<f64> {
        let now = metric.value_from(self.current.as_ref()?)?;
        let then = metric.value_from(self.history().last()?)?;
        Some(now - then)
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    pub fn trend_mode(&self) -> TrendMode {
        self.trend
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn ticks(&self) -> u64 {
        self.dashboard.ticks()
    }

    pub fn refresh(&self) -> Duration {
        self.dashboard.refresh()
    }

    pub fn seed(&self) -> Option<u64> {
        self.dashboard.seed()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DashboardConfig {
        DashboardConfig {
            seed: Some(8),
            ..Default::default()
        }
    }

    #[test]
    fn view_cycles_through_all_variants() {
        let mut v = View::default();
        for expected in [View::Research, View::About, View::Station] {
            v = v.next();
            assert_eq!(v, expected);
        }
        for v in View::ALL {
            assert_eq!(v.next().prev(), v);
            assert_eq!(View::ALL[v.index()], v);
        }
    }

    #[test]
    fn trend_mode_cycles_back_to_climate() {
        let mut mode = TrendMode::default();
        assert_eq!(mode, TrendMode::Climate);
        for metric in Metric::ALL {
            mode = mode.next();
            assert_eq!(mode, TrendMode::Single(metric));
        }
        assert_eq!(mode.next(), TrendMode::Climate);
        assert_eq!(TrendMode::Climate.label(), "Temperature & humidity");
    }

    #[test]
    fn view_from_digit() {
        assert_eq!(View::from_digit('1'), Some(View::Station));
        assert_eq!(View::from_digit('3'), Some(View::About));
        assert_eq!(View::from_digit('0'), None);
        assert_eq!(View::from_digit('4'), None);
    }

    #[tokio::test(start_paused = true)]
    async fn keys_switch_views_and_metrics() {
        let mut app = App::new(&config(), PathBuf::from("."));
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.active_view(), View::Research);
        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.active_view(), View::About);
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.active_view(), View::Research);

        assert_eq!(app.trend_mode(), TrendMode::Climate);
        app.handle_key(KeyCode::Char('g'));
        assert_eq!(app.trend_mode(), TrendMode::Single(Metric::Temperature));
        app.handle_key(KeyCode::Char('g'));
        assert_eq!(app.trend_mode(), TrendMode::Single(Metric::Humidity));

        app.handle_key(KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[tokio::test(start_paused = true)]
    async fn picks_up_live_ticks_unless_paused() {
        let mut app = App::new(&config(), PathBuf::from("."));
        assert_eq!(app.current(), app.history().last());
        assert!(!app.refresh_current());
        assert_eq!(app.live_delta(Metric::Temperature), Some(0.0));

        tokio::time::sleep(Duration::from_millis(3_001)).await;
        assert!(app.refresh_current());
        assert_ne!(app.current(), app.history().last());
        assert!(app.live_delta(Metric::Temperature).unwrap().abs() <= 0.5);

        app.handle_key(KeyCode::Char('p'));
        let frozen = app.current().cloned();
        tokio::time::sleep(Duration::from_millis(3_000)).await;
        assert!(!app.refresh_current());
        assert_eq!(app.current().cloned(), frozen);

        app.handle_key(KeyCode::Char('p'));
        assert!(app.refresh_current());
    }

    #[tokio::test(start_paused = true)]
    async fn export_writes_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = App::new(&config(), tmp.path().to_path_buf());
        app.handle_key(KeyCode::Char('s'));

        let status = app.status().unwrap();
        assert!(status.starts_with("Snapshot saved to"), "{status}");
        let files: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().flatten().collect();
        assert_eq!(files.len(), 1);
    }
}
