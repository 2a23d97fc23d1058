//! Fetch lifecycle for the movie detail screen
//!
//! [`DetailFetchController`] takes the raw route parameter, decides whether a
//! lookup is warranted, and holds the result. A bad parameter never reaches
//! the provider: the screen shows its loading placeholder and a redirect home
//! is scheduled shortly after.
//!
//! Fetches run as tokio tasks and report back over a channel. The owner
//! applies results on its own loop via [`DetailFetchController::pump`] or
//! [`DetailFetchController::next_update`], so state only changes on the
//! thread that renders it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::MovieProvider;
use crate::models::DetailRecord;
use crate::nav::Navigator;
use crate::route::{Identifier, RouteParam, Validated};
use crate::schedule::ScheduledTask;

/// Delay before an invalid parameter sends the user home
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(100);

/// Lifecycle of the one detail lookup this screen cares about
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    /// Lookup requested (or not yet resolved), no record yet
    #[default]
    Pending,
    /// Provider returned the record
    Resolved(DetailRecord),
    /// Parameter was invalid, nothing was requested
    Skipped,
}

impl FetchState {
    pub fn record(&self) -> Option<&DetailRecord> {
        match self {
            FetchState::Resolved(record) => Some(record),
            _ => None,
        }
    }
}

/// What the view needs to decide between placeholder and content
#[derive(Debug, Clone, PartialEq)]
pub struct DetailSnapshot {
    pub state: FetchState,
    pub is_loading: bool,
}

impl DetailSnapshot {
    /// Full content is shown only for a resolved record that is not loading
    pub fn should_render_content(&self) -> bool {
        !self.is_loading && matches!(self.state, FetchState::Resolved(_))
    }
}

/// Completion message from a fetch task
#[derive(Debug)]
pub struct FetchEvent {
    pub identifier: Identifier,
    pub result: anyhow::Result<DetailRecord>,
}

/// Validates the route parameter, issues at most one fetch per identifier,
/// and schedules the fallback redirect for invalid parameters.
///
/// Must be used from within a tokio runtime.
pub struct DetailFetchController {
    provider: Arc<dyn MovieProvider>,
    navigator: Arc<dyn Navigator>,
    redirect_delay: Duration,

    state: FetchState,
    current: Option<Identifier>,
    last_failure: Option<String>,

    fetch: Option<JoinHandle<()>>,
    redirect: Option<ScheduledTask>,

    events_tx: UnboundedSender<FetchEvent>,
    events_rx: UnboundedReceiver<FetchEvent>,
}

impl DetailFetchController {
    pub fn new(provider: Arc<dyn MovieProvider>, navigator: Arc<dyn Navigator>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            provider,
            navigator,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            state: FetchState::Pending,
            current: None,
            last_failure: None,
            fetch: None,
            redirect: None,
            events_tx,
            events_rx,
        }
    }

    /// Override the redirect delay (from config)
    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    // -------------------------------------------------------------------------
    // Observables
    // -------------------------------------------------------------------------

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Loading until a record is resolved, including for skipped lookups
    pub fn is_loading(&self) -> bool {
        !matches!(self.state, FetchState::Resolved(_))
    }

    pub fn snapshot(&self) -> DetailSnapshot {
        DetailSnapshot {
            state: self.state.clone(),
            is_loading: self.is_loading(),
        }
    }

    /// Identifier of the lookup currently tracked, if any
    pub fn identifier(&self) -> Option<&Identifier> {
        self.current.as_ref()
    }

    /// Message of the last fetch failure for the current identifier
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetch.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn redirect_pending(&self) -> bool {
        self.redirect.as_ref().is_some_and(ScheduledTask::is_pending)
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Validate the parameter and start (or skip) the lookup
    pub fn resolve(&mut self, param: impl Into<RouteParam>) -> &FetchState {
        let param = param.into();
        match param.validate() {
            Validated::Valid(identifier) => self.resolve_valid(identifier),
            Validated::Invalid => self.resolve_invalid(&param),
        }
        &self.state
    }

    fn resolve_valid(&mut self, identifier: Identifier) {
        if let Some(mut redirect) = self.redirect.take() {
            debug!(%identifier, "identifier became valid, canceling redirect");
            redirect.cancel();
        }

        if self.current.as_ref() == Some(&identifier) {
            debug!(%identifier, "already tracking identifier, no new fetch");
            return;
        }

        self.abort_fetch();
        self.state = FetchState::Pending;
        self.last_failure = None;
        self.current = Some(identifier.clone());

        info!(%identifier, "fetching movie details");
        let provider = Arc::clone(&self.provider);
        let tx = self.events_tx.clone();
        self.fetch = Some(tokio::spawn(async move {
            let result = provider.movie_details(identifier.as_str()).await;
            // Receiver lives as long as the controller; a send error means it is gone
            let _ = tx.send(FetchEvent { identifier, result });
        }));
    }

    fn resolve_invalid(&mut self, param: &RouteParam) {
        self.abort_fetch();
        self.current = None;
        self.last_failure = None;

        if self.state == FetchState::Skipped {
            // Same invalid occurrence, the redirect is already scheduled or done
            return;
        }
        self.state = FetchState::Skipped;

        debug!(?param, delay_ms = self.redirect_delay.as_millis() as u64, "invalid movie id, scheduling redirect home");
        let navigator = Arc::clone(&self.navigator);
        self.redirect = Some(ScheduledTask::once(self.redirect_delay, move || {
            info!("redirecting home after invalid movie id");
            navigator.replace_home();
        }));
    }

    /// Apply every fetch completion already delivered. Returns true if the
    /// state changed.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events_rx.try_recv() {
            changed |= self.apply(event);
        }
        changed
    }

    /// Wait for the next fetch completion and apply it. Returns true if the
    /// state changed, false for a discarded stale result.
    ///
    /// Does not return while no fetch is running; callers bound it with a
    /// timeout.
    pub async fn next_update(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => self.apply(event),
            None => false,
        }
    }

    fn apply(&mut self, event: FetchEvent) -> bool {
        let FetchEvent { identifier, result } = event;

        if self.current.as_ref() != Some(&identifier) {
            debug!(%identifier, "discarding stale fetch result");
            return false;
        }
        self.fetch = None;

        match result {
            Ok(record) => {
                info!(%identifier, title = %record.title, "movie details resolved");
                self.state = FetchState::Resolved(record);
                true
            }
            Err(e) => {
                // No recovery policy: the view stays on its loading placeholder
                warn!(%identifier, error = %e, "movie details fetch failed");
                self.last_failure = Some(e.to_string());
                false
            }
        }
    }

    /// Cancel everything outstanding. Called when the screen goes away.
    ///
    /// The controller is back in its freshly mounted state afterwards, so a
    /// later `resolve` starts a new lookup or schedules a new redirect.
    pub fn teardown(&mut self) {
        if let Some(mut redirect) = self.redirect.take() {
            if redirect.is_pending() {
                debug!("teardown canceled pending redirect");
            }
            redirect.cancel();
        }
        self.abort_fetch();
        self.state = FetchState::Pending;
        self.current = None;
        self.last_failure = None;
    }

    fn abort_fetch(&mut self) {
        if let Some(handle) = self.fetch.take() {
            handle.abort();
        }
    }
}

impl Drop for DetailFetchController {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for DetailFetchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailFetchController")
            .field("state", &self.state)
            .field("current", &self.current)
            .field("redirect_delay", &self.redirect_delay)
            .field("fetching", &self.is_fetching())
            .field("redirect_pending", &self.redirect_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StaticProvider {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MovieProvider for StaticProvider {
        async fn movie_details(&self, id: &str) -> anyhow::Result<DetailRecord> {
            self.calls.lock().unwrap().push(id.to_string());
            Ok(DetailRecord {
                title: format!("Movie {}", id),
                ..Default::default()
            })
        }
    }

    #[derive(Default)]
    struct CountingNavigator {
        home: AtomicUsize,
    }

    impl Navigator for CountingNavigator {
        fn replace_home(&self) {
            self.home.fetch_add(1, Ordering::SeqCst);
        }

        fn go_back_or_home(&self) {}
    }

    fn controller() -> (DetailFetchController, Arc<StaticProvider>, Arc<CountingNavigator>) {
        let provider = Arc::new(StaticProvider {
            calls: Mutex::new(Vec::new()),
        });
        let nav = Arc::new(CountingNavigator::default());
        let c = DetailFetchController::new(provider.clone(), nav.clone());
        (c, provider, nav)
    }

    #[test]
    fn test_snapshot_content_gate() {
        let loading = DetailSnapshot {
            state: FetchState::Pending,
            is_loading: true,
        };
        assert!(!loading.should_render_content());

        let done = DetailSnapshot {
            state: FetchState::Resolved(DetailRecord::default()),
            is_loading: false,
        };
        assert!(done.should_render_content());
    }

    #[tokio::test]
    async fn test_initial_state_is_loading() {
        let (c, _, _) = controller();
        assert_eq!(c.state(), &FetchState::Pending);
        assert!(c.is_loading());
        assert!(c.identifier().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_then_invalid_discards_result() {
        let (mut c, _, nav) = controller();
        c.resolve("42");
        c.resolve("");
        assert_eq!(c.state(), &FetchState::Skipped);

        tokio::time::sleep(Duration::from_millis(150)).await;
        c.pump();
        assert_eq!(c.state(), &FetchState::Skipped);
        assert_eq!(nav.home.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_invalid_schedules_once() {
        let (mut c, _, nav) = controller();
        c.resolve("");
        c.resolve("   ");
        c.resolve(RouteParam::Missing);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(nav.home.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_resets_for_next_resolve() {
        let (mut c, provider, nav) = controller();
        c.resolve("");
        tokio::time::sleep(Duration::from_millis(50)).await;
        c.teardown();
        assert_eq!(c.state(), &FetchState::Pending);

        // A fresh invalid occurrence gets its own redirect
        assert_eq!(c.resolve(""), &FetchState::Skipped);
        assert!(c.redirect_pending());
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(nav.home.load(Ordering::SeqCst), 1);

        // And the same identifier is looked up again
        c.resolve("7");
        assert!(c.next_update().await);
        c.teardown();
        assert!(c.identifier().is_none());
        c.resolve("7");
        assert!(c.next_update().await);
        assert_eq!(provider.calls.lock().unwrap().as_slice(), ["7", "7"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_redirect_delay() {
        let (c, _, nav) = controller();
        let mut c = c.with_redirect_delay(Duration::from_millis(300));
        c.resolve("");

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(nav.home.load(Ordering::SeqCst), 0);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(nav.home.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_result_is_discarded() {
        let (mut c, _, _) = controller();
        c.resolve("2");

        let stale = RouteParam::from("1").validate();
        let identifier = stale.identifier().cloned().unwrap();
        c.events_tx
            .send(FetchEvent {
                identifier,
                result: Ok(DetailRecord::default()),
            })
            .unwrap();

        assert!(!c.pump());
        assert_eq!(c.state(), &FetchState::Pending);
        assert!(c.is_fetching());
    }

    #[tokio::test]
    async fn test_resolves_through_pump() {
        let (mut c, provider, _) = controller();
        c.resolve("7");
        assert!(c.next_update().await);
        assert_eq!(c.state().record().map(|r| r.title.as_str()), Some("Movie 7"));
        assert!(!c.is_loading());
        assert!(!c.pump());
        assert_eq!(provider.calls.lock().unwrap().as_slice(), ["7"]);
    }
}
