//! Onboarding session service
//!
//! Holds one `WizardController` per console session in memory. Every
//! operation runs under the store lock except the upstream submission call:
//! the wizard is claimed with `begin_submission`, the lock is released while
//! the request is in flight, and the outcome is settled afterwards. The call
//! and its settlement run on a spawned task, so a caller that goes away
//! mid-request cannot leave the session stuck in the submitting state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use shared::{
    CreatedInventory, InventoryCreator, SubmissionError, WizardController, WizardSnapshot,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::WizardConfig;
use crate::error::{AppError, AppResult};

struct Session {
    controller: WizardController,
    last_touched: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            controller: WizardController::new(),
            last_touched: Instant::now(),
        }
    }

    fn is_idle(&self, now: Instant, ttl: Duration) -> bool {
        !self.controller.is_submitting() && now.duration_since(self.last_touched) >= ttl
    }
}

/// Today's date for expiry classification and batch defaults
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// In-memory store of onboarding wizards
#[derive(Clone)]
pub struct WizardService {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    ttl: Duration,
    confirm_destructive_toggle: bool,
}

impl WizardService {
    pub fn new(config: &WizardConfig) -> Self {
        Self::with_ttl(
            Duration::from_secs(config.session_ttl_minutes.saturating_mul(60)),
            config.confirm_destructive_tracking_toggle,
        )
    }

    pub fn with_ttl(ttl: Duration, confirm_destructive_toggle: bool) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            confirm_destructive_toggle,
        }
    }

    /// Start a new onboarding session
    pub async fn create(&self) -> (Uuid, WizardSnapshot) {
        let id = Uuid::new_v4();
        let session = Session::new();
        let snapshot = session.controller.snapshot(today());

        let mut sessions = self.sessions.lock().await;
        sessions.insert(id, session);
        tracing::info!(session_id = %id, active = sessions.len(), "Onboarding session created");

        (id, snapshot)
    }

    pub async fn snapshot(&self, id: Uuid) -> AppResult<WizardSnapshot> {
        self.with_session(id, |controller| Ok(controller.snapshot(today())))
            .await
    }

    /// Discard a session. Refused while its submission is in flight.
    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(&id) {
            None => Err(session_not_found(id)),
            Some(session) if session.controller.is_submitting() => {
                Err(shared::WizardError::SubmissionInProgress.into())
            }
            Some(_) => {
                sessions.remove(&id);
                tracing::info!(session_id = %id, "Onboarding session discarded");
                Ok(())
            }
        }
    }

    /// Run `operation` against a session's wizard and return its result
    pub async fn with_session<T, F>(&self, id: Uuid, operation: F) -> AppResult<T>
    where
        F: FnOnce(&mut WizardController) -> AppResult<T>,
    {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        session.last_touched = Instant::now();
        operation(&mut session.controller)
    }

    /// Like [`with_session`](Self::with_session), answering with a fresh snapshot
    pub async fn update<T, F>(&self, id: Uuid, operation: F) -> AppResult<WizardSnapshot>
    where
        F: FnOnce(&mut WizardController) -> AppResult<T>,
    {
        self.with_session(id, |controller| {
            operation(controller)?;
            Ok(controller.snapshot(today()))
        })
        .await
    }

    /// Toggle batch tracking.
    ///
    /// Disabling discards every batch; when confirmation is configured, a
    /// non-empty batch list is only discarded with `confirm` set.
    pub async fn toggle_batch_tracking(
        &self,
        id: Uuid,
        enabled: bool,
        confirm: bool,
    ) -> AppResult<WizardSnapshot> {
        let confirm_required = self.confirm_destructive_toggle;
        self.update(id, |controller| {
            let expiry = &controller.form().expiry;
            let discards_batches =
                !enabled && expiry.is_tracking_enabled() && !expiry.batches().is_empty();

            if discards_batches && confirm_required && !confirm {
                return Err(AppError::ConfirmationRequired(format!(
                    "Disabling batch tracking discards {} batch(es); resend with confirm=true",
                    expiry.batches().len()
                )));
            }

            controller.toggle_batch_tracking(enabled, today())?;
            Ok(())
        })
        .await
    }

    /// Submit the session's wizard through `creator`.
    ///
    /// A second submit while one is in flight fails with
    /// `SubmissionInProgress` and has no other effect. The upstream call is
    /// detached from the caller: dropping the returned future still lets the
    /// outcome settle on the session.
    pub async fn submit<C>(&self, id: Uuid, creator: Arc<C>) -> AppResult<WizardSnapshot>
    where
        C: InventoryCreator + Send + Sync + 'static,
    {
        let payload = self
            .with_session(id, |controller| Ok(controller.begin_submission()?))
            .await?;

        tracing::info!(
            session_id = %id,
            product_id = %payload.product_id,
            batches = payload.expiry_tracking.batches.len(),
            "Submitting inventory"
        );

        let service = self.clone();
        let task = tokio::spawn(async move {
            let outcome = creator.create_inventory(&payload).await;
            service.settle_submission(id, outcome).await
        });

        task.await.unwrap_or_else(|error| {
            tracing::error!(session_id = %id, "Submission task failed: {}", error);
            Err(AppError::Wizard(
                SubmissionError::unavailable("Submission was interrupted").into(),
            ))
        })
    }

    async fn settle_submission(
        &self,
        id: Uuid,
        outcome: Result<CreatedInventory, SubmissionError>,
    ) -> AppResult<WizardSnapshot> {
        match &outcome {
            Ok(created) => tracing::info!(
                session_id = %id,
                inventory_id = %created.inventory_id,
                "Inventory created"
            ),
            Err(error) => tracing::warn!(session_id = %id, "Inventory creation failed: {}", error),
        }

        let failure: Option<SubmissionError> = outcome.as_ref().err().cloned();
        let snapshot = self
            .with_session(id, |controller| {
                controller.complete_submission(outcome)?;
                Ok(controller.snapshot(today()))
            })
            .await?;

        match failure {
            Some(error) => Err(AppError::Wizard(error.into())),
            None => Ok(snapshot),
        }
    }

    /// Drop sessions idle for longer than the time-to-live. Sessions with a
    /// submission in flight are kept.
    pub async fn purge_idle(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(now, self.ttl));
        let purged = before - sessions.len();

        if purged > 0 {
            tracing::info!(purged, active = sessions.len(), "Purged idle onboarding sessions");
        }
        purged
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Onboarding session {}", id))
}
