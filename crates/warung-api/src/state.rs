//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the site document with its bound page, and the visitor sessions.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;
use warung_core::{validate, DirtySections, Finding, Session, SiteConfig, SiteError, SiteResult};
use warung_render::{bind, page_regions, refresh, BindReport, RegionTree};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Explicit site document path (otherwise `config/site.toml` is searched)
    pub site_config: Option<PathBuf>,
    /// Token required by the admin mutator routes; open when unset
    pub admin_token: Option<String>,
    /// Idle minutes before a visitor session is dropped
    pub session_ttl_minutes: i64,
    /// Live sessions the store holds before refusing new ones
    pub max_sessions: usize,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            site_config: std::env::var("SITE_CONFIG").ok().map(PathBuf::from),
            admin_token: std::env::var("ADMIN_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            session_ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .filter(|m| *m > 0)
                .unwrap_or(120),
            max_sessions: std::env::var("MAX_SESSIONS")
                .ok()
                .and_then(|m| m.parse().ok())
                .filter(|m| *m > 0)
                .unwrap_or(10_000),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e)
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::minutes(self.session_ttl_minutes)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// The site document, its load-time findings and the page bound from it
#[derive(Debug, Clone)]
pub struct SiteState {
    pub config: SiteConfig,
    pub page: RegionTree,
    pub findings: Vec<Finding>,
}

impl SiteState {
    /// Validate once, log findings, bind the page. Findings never block.
    pub fn load(config: SiteConfig) -> Self {
        let findings = validate(&config);
        for finding in &findings {
            warn!(kind = ?finding.kind, field = %finding.field, "{}", finding.message);
        }

        let mut page = page_regions();
        let report = bind(&config, &mut page);
        info!(
            written = report.written,
            cleared = report.cleared,
            findings = findings.len(),
            "Site bound: {}",
            config.identity.name
        );

        Self {
            config,
            page,
            findings,
        }
    }

    /// Rebind the sections a mutator reported as dirty
    pub fn apply(&mut self, dirty: &DirtySections) -> BindReport {
        refresh(dirty, &self.config, &mut self.page)
    }
}

/// A session and its timestamps
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub session: Session,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

/// Visitor sessions keyed by UUID, dropped after an idle TTL.
/// Holds at most `max_sessions` live sessions.
#[derive(Debug)]
pub struct SessionStore {
    sessions: HashMap<Uuid, SessionEntry>,
    ttl: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl,
            max_sessions,
        }
    }

    /// Start a new session, unless the store is full after pruning
    pub fn create(&mut self, now: DateTime<Utc>) -> SiteResult<Uuid> {
        self.prune(now);
        if self.sessions.len() >= self.max_sessions {
            return Err(SiteError::SessionLimit {
                limit: self.max_sessions,
            });
        }

        let id = Uuid::new_v4();
        self.sessions.insert(
            id,
            SessionEntry {
                session: Session::new(),
                created_at: now,
                last_seen: now,
            },
        );
        Ok(id)
    }

    /// Live session by id; touching it extends its lifetime
    pub fn get_mut(&mut self, id: &str, now: DateTime<Utc>) -> SiteResult<&mut SessionEntry> {
        self.prune(now);
        let not_found = || SiteError::SessionNotFound {
            session_id: id.to_string(),
        };

        let key = Uuid::parse_str(id).map_err(|_| not_found())?;
        let entry = self.sessions.get_mut(&key).ok_or_else(not_found)?;
        entry.last_seen = now;
        Ok(entry)
    }

    /// Drop sessions idle longer than the TTL
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let ttl = self.ttl;
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| now - entry.last_seen <= ttl);

        let dropped = before - self.sessions.len();
        if dropped > 0 {
            debug!(dropped, "Expired sessions pruned");
        }
        dropped
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Site document and bound page
    pub site: Arc<RwLock<SiteState>>,
    /// Visitor sessions
    pub sessions: Arc<Mutex<SessionStore>>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create the state from environment config and the site document on disk
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let document = load_site_config(config.site_config.as_deref())?;
        Ok(Self::with_document(config, document))
    }

    /// Create the state around an already loaded document
    pub fn with_document(config: AppConfig, document: SiteConfig) -> Self {
        let sessions = SessionStore::new(config.session_ttl(), config.max_sessions);
        Self {
            site: Arc::new(RwLock::new(SiteState::load(document))),
            sessions: Arc::new(Mutex::new(sessions)),
            config,
        }
    }

    /// Check the admin token, when one is configured
    pub fn authorize(&self, presented: Option<&str>) -> SiteResult<()> {
        match &self.config.admin_token {
            None => Ok(()),
            Some(expected) if presented == Some(expected.as_str()) => Ok(()),
            Some(_) => Err(SiteError::Unauthorized),
        }
    }
}

/// Load the site document from `path`, or search the usual config locations
pub fn load_site_config(path: Option<&Path>) -> anyhow::Result<SiteConfig> {
    if let Some(path) = path {
        return read_site_config(path);
    }

    let config_paths = [
        "config/site.toml",
        "../config/site.toml",
        "../../config/site.toml",
    ];

    for path in config_paths {
        let path = Path::new(path);
        if path.exists() {
            return read_site_config(path);
        }
    }

    // Validation will report the missing fields; the site still serves
    warn!("No site document found, using defaults");
    Ok(SiteConfig::default())
}

fn read_site_config(path: &Path) -> anyhow::Result<SiteConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    let config = SiteConfig::from_toml(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
    info!(
        "Loaded site document from {} ({} categories)",
        path.display(),
        config.catalog.len()
    );
    Ok(config)
}
