//! # Application State
//!
//! Shared state for the Axum application: configuration, the saved-form
//! store, per-caller form sessions, search providers, and metrics.
//!
//! ## Sessions
//!
//! Each form kind has its own `DashMap<Caller, Tracked<Controller>>`. A
//! handler takes a shard guard only for the synchronous part of its work
//! (apply an event, clone the payload) and drops it before awaiting
//! storage.
//!
//! Sessions are bounded two ways: each map holds at most
//! [`AppConfig::max_sessions`] entries (the least recently used is evicted
//! to make room), and [`spawn_session_sweeper`] drops entries idle for
//! longer than [`AppConfig::session_idle`]. An evicted registered user
//! gets their last saved record back on the next request.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use bizform_core::{Caller, FormKind, UserId};
use bizform_resolver::{BankDirectory, LicenseDirectory, StaticBankDirectory, StaticLicenseDirectory};
use bizform_state::{
    BankingController, EinController, FormController, GatewayError, LicenseController,
    LlcController, MemoryGateway, PersistenceGateway, StoredForm,
};

use crate::db::PgGateway;
use crate::middleware::metrics::ApiMetrics;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Whether `/metrics` and the metrics middleware are mounted.
    pub metrics_enabled: bool,
    /// Sessions untouched for this long are dropped by the sweeper.
    pub session_idle: Duration,
    /// Upper bound on live sessions per form.
    pub max_sessions: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            metrics_enabled: true,
            session_idle: Duration::from_secs(30 * 60),
            max_sessions: 10_000,
        }
    }
}

/// Where saved forms live.
#[derive(Debug, Clone)]
pub enum FormStore {
    Memory(MemoryGateway),
    Postgres(PgGateway),
}

impl FormStore {
    /// Backend label for logs and readiness output.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres",
        }
    }
}

impl PersistenceGateway for FormStore {
    async fn upsert(
        &self,
        kind: FormKind,
        user: &UserId,
        payload: serde_json::Value,
    ) -> Result<(), GatewayError> {
        match self {
            Self::Memory(g) => g.upsert(kind, user, payload).await,
            Self::Postgres(g) => g.upsert(kind, user, payload).await,
        }
    }

    async fn load_latest(
        &self,
        kind: FormKind,
        user: &UserId,
    ) -> Result<Option<StoredForm>, GatewayError> {
        match self {
            Self::Memory(g) => g.load_latest(kind, user).await,
            Self::Postgres(g) => g.load_latest(kind, user).await,
        }
    }
}

// ─── Sessions ────────────────────────────────────────────────────────

/// A session controller and when it was last used.
#[derive(Debug)]
pub struct Tracked<C> {
    pub controller: C,
    touched: Instant,
}

impl<C> Tracked<C> {
    pub fn new(controller: C) -> Self {
        Self {
            controller,
            touched: Instant::now(),
        }
    }

    /// Mark the session as used now.
    pub fn touch(&mut self) {
        self.touched = Instant::now();
    }

    /// How long the session has been idle as of `now`.
    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.touched)
    }
}

/// In-memory controllers, one map per form.
#[derive(Debug, Default)]
pub struct Sessions {
    llc: DashMap<Caller, Tracked<LlcController>>,
    ein: DashMap<Caller, Tracked<EinController>>,
    licenses: DashMap<Caller, Tracked<LicenseController>>,
    banking: DashMap<Caller, Tracked<BankingController>>,
}

impl Sessions {
    /// Number of live sessions for a form.
    pub fn count(&self, kind: FormKind) -> usize {
        match kind {
            FormKind::Llc => self.llc.len(),
            FormKind::Ein => self.ein.len(),
            FormKind::Licenses => self.licenses.len(),
            FormKind::Banking => self.banking.len(),
        }
    }

    /// Drop every session idle for at least `max_idle`. Returns how many
    /// were dropped.
    pub fn sweep_idle(&self, max_idle: Duration) -> usize {
        self.sweep_idle_at(Instant::now(), max_idle)
    }

    /// [`Sessions::sweep_idle`] with an explicit clock reading.
    pub fn sweep_idle_at(&self, now: Instant, max_idle: Duration) -> usize {
        drop_idle(&self.llc, now, max_idle)
            + drop_idle(&self.ein, now, max_idle)
            + drop_idle(&self.licenses, now, max_idle)
            + drop_idle(&self.banking, now, max_idle)
    }
}

fn drop_idle<C>(map: &DashMap<Caller, Tracked<C>>, now: Instant, max_idle: Duration) -> usize {
    let before = map.len();
    map.retain(|_, session| session.idle_for(now) < max_idle);
    before.saturating_sub(map.len())
}

/// Evict least recently used sessions until a new one fits under `max`.
pub(crate) fn make_room<C>(map: &DashMap<Caller, Tracked<C>>, max: usize) {
    while !map.is_empty() && map.len() >= max {
        let oldest = map
            .iter()
            .min_by_key(|entry| entry.value().touched)
            .map(|entry| *entry.key());
        match oldest {
            Some(caller) => {
                map.remove(&caller);
                tracing::debug!(caller = %caller, "session evicted to stay under cap");
            }
            None => break,
        }
    }
}

/// A controller that has a session map in [`Sessions`].
pub trait SessionForm: FormController + 'static {
    fn sessions(sessions: &Sessions) -> &DashMap<Caller, Tracked<Self>>;
}

impl SessionForm for LlcController {
    fn sessions(sessions: &Sessions) -> &DashMap<Caller, Tracked<Self>> {
        &sessions.llc
    }
}

impl SessionForm for EinController {
    fn sessions(sessions: &Sessions) -> &DashMap<Caller, Tracked<Self>> {
        &sessions.ein
    }
}

impl SessionForm for LicenseController {
    fn sessions(sessions: &Sessions) -> &DashMap<Caller, Tracked<Self>> {
        &sessions.licenses
    }
}

impl SessionForm for BankingController {
    fn sessions(sessions: &Sessions) -> &DashMap<Caller, Tracked<Self>> {
        &sessions.banking
    }
}

/// Periodically drop idle sessions. Runs until the runtime shuts down.
pub fn spawn_session_sweeper(state: &AppState) -> tokio::task::JoinHandle<()> {
    let sessions = state.sessions.clone();
    let max_idle = state.config.session_idle;
    let period = (max_idle / 4).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let dropped = sessions.sweep_idle(max_idle);
            if dropped > 0 {
                tracing::info!(dropped, "idle form sessions dropped");
            }
        }
    })
}

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: FormStore,
    pub sessions: Arc<Sessions>,
    pub license_directory: Arc<dyn LicenseDirectory>,
    pub bank_directory: Arc<dyn BankDirectory>,
    pub metrics: ApiMetrics,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("store", &self.store.backend_name())
            .field("license_directory", &self.license_directory.provider_name())
            .field("bank_directory", &self.bank_directory.provider_name())
            .finish()
    }
}

impl AppState {
    /// In-memory state with default configuration and static providers.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), FormStore::Memory(MemoryGateway::new()))
    }

    /// State with the given configuration and store, and static providers.
    pub fn with_config(config: AppConfig, store: FormStore) -> Self {
        Self {
            config,
            store,
            sessions: Arc::new(Sessions::default()),
            license_directory: Arc::new(StaticLicenseDirectory),
            bank_directory: Arc::new(StaticBankDirectory),
            metrics: ApiMetrics::new(),
        }
    }

    /// Replace the search providers.
    pub fn with_directories(
        mut self,
        licenses: Arc<dyn LicenseDirectory>,
        banks: Arc<dyn BankDirectory>,
    ) -> Self {
        self.license_directory = licenses;
        self.bank_directory = banks;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
