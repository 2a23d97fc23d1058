//! App state and core application logic
//!
//! Owns the navigation history, reacts to keys, and keeps the detail screen's
//! controller in step with the current route. Everything here runs on the
//! event loop; background work only talks back through channels.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::debug;

use crate::api::tmdb::DEFAULT_IMAGE_BASE_URL;
use crate::api::MovieProvider;
use crate::controller::{DetailFetchController, DetailSnapshot, DEFAULT_REDIRECT_DELAY};
use crate::nav::{ChannelNavigator, NavRequest, NavStack, Navigator, Route};
use crate::route::RouteParam;

// =============================================================================
// Settings
// =============================================================================

/// Knobs the app takes from config
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub image_base_url: String,
    pub redirect_delay: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }
}

// =============================================================================
// Home Screen State
// =============================================================================

/// Movie ID prompt on the home screen
#[derive(Debug, Clone, Default)]
pub struct HomeState {
    /// Typed movie ID
    pub query: String,
    /// Cursor position in query (in chars)
    pub cursor: usize,
}

impl HomeState {
    fn byte_index(&self) -> usize {
        self.query
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index();
        self.query.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index();
            self.query.remove(idx);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.query.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }
}

// =============================================================================
// Detail Screen State
// =============================================================================

/// A mounted detail screen: the route parameter it was opened with and the
/// controller tracking its lookup
#[derive(Debug)]
pub struct DetailScreen {
    pub param: RouteParam,
    pub controller: DetailFetchController,
    /// Scroll offset for the overview text
    pub scroll: u16,
}

impl DetailScreen {
    pub fn snapshot(&self) -> DetailSnapshot {
        self.controller.snapshot()
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
pub struct App {
    /// Route history
    pub nav: NavStack,
    /// Whether the app is running
    pub running: bool,
    pub home: HomeState,
    /// Mounted while the current route is a movie
    pub detail: Option<DetailScreen>,
    pub settings: AppSettings,

    provider: Arc<dyn MovieProvider>,
    navigator: Arc<ChannelNavigator>,
    nav_rx: UnboundedReceiver<NavRequest>,
}

impl App {
    /// Create a new App starting on the home screen. Needs a tokio runtime.
    pub fn new(provider: Arc<dyn MovieProvider>, settings: AppSettings) -> Self {
        let (tx, nav_rx) = mpsc::unbounded_channel();
        Self {
            nav: NavStack::default(),
            running: true,
            home: HomeState::default(),
            detail: None,
            settings,
            provider,
            navigator: Arc::new(ChannelNavigator::new(tx)),
            nav_rx,
        }
    }

    /// Open a movie route directly (from the command line)
    pub fn open_movie(&mut self, param: impl Into<RouteParam>) {
        self.nav.navigate(Route::Movie(param.into()));
        self.sync_route();
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
        self.detail = None;
    }

    /// Apply pending navigation requests and fetch results.
    /// Returns true if anything changed.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        while let Ok(request) = self.nav_rx.try_recv() {
            debug!(?request, "applying navigation request");
            self.nav.apply(request);
            changed = true;
        }
        if changed {
            self.sync_route();
        }
        if let Some(detail) = self.detail.as_mut() {
            changed |= detail.controller.pump();
        }
        changed
    }

    /// Mount or unmount the detail screen to match the current route
    fn sync_route(&mut self) {
        match self.nav.current().clone() {
            Route::Home => {
                if self.detail.take().is_some() {
                    debug!("detail screen unmounted");
                }
            }
            Route::Movie(param) => {
                if self.detail.as_ref().is_some_and(|d| d.param == param) {
                    return;
                }
                // Dropping the old screen tears down its controller
                self.detail = None;

                let navigator: Arc<dyn Navigator> = self.navigator.clone();
                let mut controller = DetailFetchController::new(self.provider.clone(), navigator)
                    .with_redirect_delay(self.settings.redirect_delay);
                controller.resolve(param.clone());
                self.detail = Some(DetailScreen {
                    param,
                    controller,
                    scroll: 0,
                });
            }
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        match self.nav.current() {
            Route::Home => self.handle_home_key(key),
            Route::Movie(_) => self.handle_detail_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.quit();
                true
            }
            KeyCode::Enter => {
                let id = self.home.query.clone();
                self.home.clear();
                self.open_movie(id);
                true
            }
            KeyCode::Char(c) => {
                self.home.insert(c);
                true
            }
            KeyCode::Backspace => {
                self.home.backspace();
                true
            }
            KeyCode::Left => {
                self.home.cursor_left();
                true
            }
            KeyCode::Right => {
                self.home.cursor_right();
                true
            }
            _ => false,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                true
            }
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                self.navigator.go_back_or_home();
                // apply right away so the key feels immediate
                self.tick();
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.scroll = detail.scroll.saturating_sub(1);
                }
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.scroll = detail.scroll.saturating_add(1);
                }
                true
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("nav", &self.nav)
            .field("running", &self.running)
            .field("home", &self.home)
            .field("detail", &self.detail)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_input_editing() {
        let mut home = HomeState::default();
        for c in "4é2".chars() {
            home.insert(c);
        }
        assert_eq!(home.query, "4é2");
        home.cursor_left();
        home.backspace();
        assert_eq!(home.query, "42");
        assert_eq!(home.cursor, 1);
        home.cursor_right();
        home.cursor_right();
        assert_eq!(home.cursor, 2);
        home.clear();
        assert!(home.query.is_empty());
    }
}
