//! Application state and event dispatch.
//!
//! Frontends own an [`App`] and the receiving end of its delivery channel.
//! User actions and background results both enter through
//! [`App::dispatch`], which is the only place [`AppState`] changes.

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::mpsc;

use crate::breach::BreachChecker;
use crate::config::CheckupConfig;
use crate::error::{CheckupError, Result};
use crate::evaluator::evaluate_password_strength;
use crate::generator::generate_password;
use crate::probe::Probe;
use crate::task::{BreachDelivery, BreachTask};

const DELIVERY_CHANNEL_CAPACITY: usize = 8;

#[derive(Debug)]
pub enum Event {
    CheckPassword(SecretString),
    CheckWebsite(String),
    RecommendPassword,
    BreachResolved(BreachDelivery),
}

/// Everything a frontend renders.
#[derive(Debug, Default)]
pub struct AppState {
    pub password_panel: Vec<String>,
    pub website_panel: Vec<String>,
    pub recommended: Option<SecretString>,
}

impl AppState {
    /// Recommended password as shown to the user.
    pub fn recommended_label(&self) -> Option<String> {
        self.recommended
            .as_ref()
            .map(|pwd| format!("🔑 {}", pwd.expose_secret()))
    }
}

pub struct App {
    state: AppState,
    checker: BreachChecker,
    probe: Probe,
    tx: mpsc::Sender<BreachDelivery>,
    in_flight: Option<BreachTask>,
    next_request_id: u64,
}

impl App {
    /// Builds the app and the receiver its breach results arrive on.
    pub fn new(config: &CheckupConfig) -> Result<(Self, mpsc::Receiver<BreachDelivery>)> {
        let (tx, rx) = mpsc::channel(DELIVERY_CHANNEL_CAPACITY);
        let app = Self {
            state: AppState::default(),
            checker: BreachChecker::new(config)?,
            probe: Probe::new(config)?,
            tx,
            in_flight: None,
            next_request_id: 1,
        };
        Ok((app, rx))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Id of the breach lookup whose result is still awaited.
    pub fn pending_request(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|task| task.request_id)
    }

    /// Applies one event.
    ///
    /// # Errors
    ///
    /// [`CheckupError::MissingInput`] when a check is requested with empty
    /// input. The affected panel is cleared and nothing else happens.
    pub async fn dispatch(&mut self, event: Event) -> Result<()> {
        match event {
            Event::CheckPassword(password) => self.check_password(password),
            Event::CheckWebsite(url) => self.check_website(&url).await,
            Event::RecommendPassword => {
                self.state.recommended = Some(generate_password());
                Ok(())
            }
            Event::BreachResolved(delivery) => {
                self.apply_delivery(delivery);
                Ok(())
            }
        }
    }

    /// Feeds deliveries from `rx` back into the app until no lookup is pending.
    pub async fn settle(&mut self, rx: &mut mpsc::Receiver<BreachDelivery>) -> Result<()> {
        while self.in_flight.is_some() {
            match rx.recv().await {
                Some(delivery) => self.dispatch(Event::BreachResolved(delivery)).await?,
                None => break,
            }
        }
        Ok(())
    }

    /// Applies every delivery already waiting in `rx` without blocking.
    ///
    /// Returns how many of them reached the password panel; stale ones are
    /// dropped and not counted.
    pub fn drain(&mut self, rx: &mut mpsc::Receiver<BreachDelivery>) -> usize {
        let mut applied = 0;
        while let Ok(delivery) = rx.try_recv() {
            if self.apply_delivery(delivery) {
                applied += 1;
            }
        }
        applied
    }

    fn check_password(&mut self, password: SecretString) -> Result<()> {
        self.state.password_panel.clear();
        if password.expose_secret().is_empty() {
            return Err(CheckupError::MissingInput { field: "password" });
        }

        let report = evaluate_password_strength(&password);
        self.state.password_panel.extend(report.lines());

        if let Some(previous) = self.in_flight.take() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                request_id = previous.request_id,
                "cancelling superseded breach lookup"
            );
            previous.cancel();
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(BreachTask::spawn(
            self.checker.clone(),
            password,
            request_id,
            self.tx.clone(),
        ));
        Ok(())
    }

    async fn check_website(&mut self, url: &str) -> Result<()> {
        self.state.website_panel.clear();
        if url.trim().is_empty() {
            return Err(CheckupError::MissingInput {
                field: "website URL",
            });
        }
        let outcome = self.probe.check(url).await;
        self.state.website_panel.push(outcome.to_string());
        Ok(())
    }

    fn apply_delivery(&mut self, delivery: BreachDelivery) -> bool {
        if self.pending_request() != Some(delivery.request_id) {
            #[cfg(feature = "tracing")]
            tracing::debug!(request_id = delivery.request_id, "dropping stale breach result");
            return false;
        }
        self.in_flight = None;
        self.state.password_panel.push(String::new());
        self.state.password_panel.push(delivery.outcome.to_string());
        true
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.cancel();
        }
    }
}
