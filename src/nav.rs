//! Navigation host and the navigation capability handed to screens
//!
//! Screens never touch the history directly. They get a [`Navigator`] and ask
//! for one of two things: replace the current route with home, or go back
//! (falling back to home when there is nothing to go back to).

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::route::RouteParam;

/// Navigation capability injected into screen controllers
pub trait Navigator: Send + Sync {
    /// Replace the current route with home
    fn replace_home(&self);

    /// Go back one route, or replace with home if there is no history
    fn go_back_or_home(&self);
}

/// A request a screen made of its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavRequest {
    ReplaceHome,
    GoBackOrHome,
}

/// Navigator that forwards requests to the event loop owning the history
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: UnboundedSender<NavRequest>,
}

impl ChannelNavigator {
    pub fn new(tx: UnboundedSender<NavRequest>) -> Self {
        Self { tx }
    }

    fn send(&self, request: NavRequest) {
        // Loop already gone means the app is shutting down; nothing to navigate
        if self.tx.send(request).is_err() {
            debug!(?request, "navigation request dropped, host closed");
        }
    }
}

impl Navigator for ChannelNavigator {
    fn replace_home(&self) {
        self.send(NavRequest::ReplaceHome);
    }

    fn go_back_or_home(&self) {
        self.send(NavRequest::GoBackOrHome);
    }
}

// =============================================================================
// Routes & History
// =============================================================================

/// A destination in the app
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Route {
    /// Home screen with the movie ID prompt
    #[default]
    Home,
    /// Movie detail screen, keyed by its raw route parameter
    Movie(RouteParam),
}

/// Route history: the current route plus a back stack
#[derive(Debug, Clone, Default)]
pub struct NavStack {
    current: Route,
    history: Vec<Route>,
}

impl NavStack {
    pub fn new(start: Route) -> Self {
        Self {
            current: start,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Push a new route, keeping the current one in history
    pub fn navigate(&mut self, route: Route) {
        if self.current != route {
            let prev = std::mem::replace(&mut self.current, route);
            self.history.push(prev);
        }
    }

    /// Swap the current route without touching history
    pub fn replace(&mut self, route: Route) {
        self.current = route;
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Pop back to the previous route, returns false when there is none
    pub fn go_back(&mut self) -> bool {
        match self.history.pop() {
            Some(prev) => {
                self.current = prev;
                true
            }
            None => false,
        }
    }

    pub fn replace_home(&mut self) {
        self.replace(Route::Home);
    }

    pub fn go_back_or_home(&mut self) {
        if !self.go_back() {
            self.replace_home();
        }
    }

    /// Apply a request forwarded by a [`ChannelNavigator`]
    pub fn apply(&mut self, request: NavRequest) {
        match request {
            NavRequest::ReplaceHome => self.replace_home(),
            NavRequest::GoBackOrHome => self.go_back_or_home(),
        }
    }
}
