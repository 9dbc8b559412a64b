//! Wiring from configuration to a ready controller.

use std::fmt;

use anyhow::{Context, Result};
use gridcal_core::auth::{LoginGate, NoDirectory};
use gridcal_core::config::GridcalConfig;
use gridcal_core::controller::CalendarController;
use gridcal_core::date;
use gridcal_core::error::GridcalResult;
use gridcal_core::event::CalendarEvent;
use gridcal_core::remote::RestBackend;
use gridcal_core::repository::{EventRepository, LocalRepository, RemoteRepository};
use gridcal_core::store::KeyValueStore;

use crate::render::TerminalNotifier;
use crate::utils::tui::create_spinner;

/// Local or hosted storage, picked from the config at startup.
pub enum Storage {
    Local(LocalRepository),
    Remote(RemoteRepository),
}

impl EventRepository for Storage {
    async fn load(&self) -> GridcalResult<Vec<CalendarEvent>> {
        match self {
            Storage::Local(repo) => repo.load().await,
            Storage::Remote(repo) => repo.load().await,
        }
    }

    async fn insert(
        &self,
        event: CalendarEvent,
        existing: &[CalendarEvent],
    ) -> GridcalResult<CalendarEvent> {
        match self {
            Storage::Local(repo) => repo.insert(event, existing).await,
            Storage::Remote(repo) => repo.insert(event, existing).await,
        }
    }
}

/// Failure that a notification already showed to the user.
#[derive(Debug)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "already reported")
    }
}

impl std::error::Error for Reported {}

pub struct AppContext {
    pub config: GridcalConfig,
    pub store: KeyValueStore,
    pub backend: Option<RestBackend>,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let config = GridcalConfig::load().context("Failed to load configuration")?;
        let store = KeyValueStore::new(config.data_path());
        let backend = config
            .backend
            .as_ref()
            .map(RestBackend::new)
            .transpose()?;

        log::debug!("data dir: {}", store.dir().display());
        if let Some(backend) = &backend {
            log::debug!("backend: {}", backend.endpoint());
        }

        Ok(AppContext {
            config,
            store,
            backend,
        })
    }

    /// The session's member, or an error telling the user to log in.
    pub fn require_login(&self) -> Result<Option<String>> {
        let gate = LoginGate::new(&self.store, &self.config.auth, NoDirectory);
        let member = gate.current_member()?;

        if self.config.login_required() && member.is_none() {
            anyhow::bail!(
                "Not logged in.\n\n\
                Log in with:\n  \
                gridcal login <team member>"
            );
        }

        Ok(member)
    }

    /// Build a controller for the configured storage and load its events.
    pub async fn controller(&self) -> Result<CalendarController<Storage>> {
        let member = self.require_login()?;

        let storage = match &self.backend {
            Some(backend) => {
                let gate = LoginGate::new(&self.store, &self.config.auth, NoDirectory);
                // Admins see every member's rows
                let filter = member.filter(|m| !gate.is_admin(m));
                Storage::Remote(RemoteRepository::new(backend.clone(), filter))
            }
            None => Storage::Local(LocalRepository::new(self.store.clone())),
        };
        let is_remote = matches!(storage, Storage::Remote(_));

        let mut controller =
            CalendarController::new(storage, Box::new(TerminalNotifier), date::today());

        let spinner = is_remote.then(|| create_spinner("Loading events".to_string()));
        let loaded = controller.load().await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        if let Err(e) = loaded {
            log::debug!("load failed: {}", e);
            return Err(Reported.into());
        }

        Ok(controller)
    }
}
