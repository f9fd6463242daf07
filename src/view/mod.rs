mod click;
mod config;
mod page;

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use scraper::ElementRef;
use tokio::sync::Mutex;
use tracing::{debug, error, instrument};

pub use click::ListClick;
pub use config::*;
pub use page::*;

use crate::client::ActivitiesClient;
use crate::error::Result;
use crate::model::StatusMessage;

pub const SIGNUP_FALLBACK: &str = "An error occurred";
pub const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
pub const REMOVE_FALLBACK: &str = "Failed to remove participant";
pub const REMOVE_FAILED: &str = "Error removing participant";

/// Keeps a [`Page`] in sync with the roster the server reports.
///
/// Every successful mutation is followed by a full refetch and re-render;
/// nothing is patched in place. Clones share the same page.
#[derive(Debug, Clone)]
pub struct RosterView {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    client: ActivitiesClient,
    config: ViewConfig,
    /// Ticket handed to the most recently issued fetch.
    issued: AtomicU64,
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    page: Page,
    /// Ticket of the newest fetch whose response reached the page.
    applied: u64,
    /// Bumped on every message so older hide timers become no-ops.
    message_epoch: u64,
}

impl RosterView {
    pub fn new(config: ViewConfig) -> Result<Self> {
        let client = ActivitiesClient::new(&config.base_url)?;
        Ok(Self::with_client(client, config))
    }

    /// Build a view around an existing client. `config.base_url` is ignored
    /// in favour of the client's.
    pub fn with_client(client: ActivitiesClient, config: ViewConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                config,
                issued: AtomicU64::new(0),
                state: Mutex::new(State::default()),
            }),
        }
    }

    pub fn client(&self) -> &ActivitiesClient {
        &self.inner.client
    }

    /// A snapshot of the page as it is now.
    pub async fn page(&self) -> Page {
        self.inner.state.lock().await.page.clone()
    }

    /// Drain the alerts raised since the last call, oldest first.
    pub async fn take_alerts(&self) -> Vec<String> {
        self.inner.state.lock().await.page.take_alerts()
    }

    /// Initial render.
    pub async fn load(&self) {
        self.fetch_and_render().await;
    }

    pub async fn select_activity(&self, activity: impl Into<String>) {
        self.inner.state.lock().await.page.form.activity = activity.into();
    }

    pub async fn set_email(&self, email: impl Into<String>) {
        self.inner.state.lock().await.page.form.email = email.into();
    }

    /// Fetch the roster and rebuild the activities list and the select.
    ///
    /// On failure the list shows a static notice and the select keeps
    /// whatever it had. A response that arrives after a newer fetch has
    /// already been applied is dropped.
    #[instrument(skip(self))]
    pub async fn fetch_and_render(&self) {
        let ticket = self.inner.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.inner.client.get_activities().await;

        let mut state = self.inner.state.lock().await;
        if ticket < state.applied {
            debug!(ticket, applied = state.applied, "dropping stale roster response");
            return;
        }
        state.applied = ticket;

        match result {
            Ok(roster) => {
                state.page.render_roster(&roster);
                debug!(ticket, count = roster.len(), "rendered roster");
            }
            Err(e) => {
                error!(error = %e, "error fetching activities");
                state.page.render_load_failure();
            }
        }
    }

    /// Submit the signup form with whatever its fields hold.
    pub async fn submit(&self) {
        let form = self.inner.state.lock().await.page.form.clone();
        self.submit_signup(&form.activity, &form.email).await;
    }

    /// Sign `email` up for `activity` and report the outcome in the message
    /// area. Only a successful signup resets the form and refetches.
    #[instrument(skip(self))]
    pub async fn submit_signup(&self, activity: &str, email: &str) {
        match self.inner.client.signup(activity, email).await {
            Ok(response) => {
                self.show_message(StatusMessage::success(response.message))
                    .await;
                self.inner.state.lock().await.page.form.reset();
                self.fetch_and_render().await;
            }
            Err(e) if e.is_transport() => {
                error!(error = %e, "error signing up");
                self.show_message(StatusMessage::error(SIGNUP_FAILED)).await;
            }
            Err(e) => {
                debug!(error = %e, "signup rejected");
                let text = e.detail().unwrap_or(SIGNUP_FALLBACK).to_string();
                self.show_message(StatusMessage::error(text)).await;
            }
        }
    }

    /// Remove `email` from `activity`. Success is reflected only by the
    /// refetch; failure raises an alert.
    #[instrument(skip(self))]
    pub async fn remove_participant(&self, activity: &str, email: &str) {
        match self.inner.client.unregister(activity, email).await {
            Ok(()) => self.fetch_and_render().await,
            Err(e) => {
                error!(error = %e, "failed to remove participant");
                let text = if e.is_transport() {
                    REMOVE_FAILED
                } else {
                    e.detail().unwrap_or(REMOVE_FALLBACK)
                };
                self.alert(text).await;
            }
        }
    }

    /// The delegated click listener of the activities list.
    ///
    /// `target` is the element that was clicked, anywhere inside the list.
    /// Clicks that do not resolve to a removal control do nothing.
    pub fn handle_list_click(
        &self,
        target: ElementRef<'_>,
    ) -> impl Future<Output = ()> + Send + 'static {
        let click = ListClick::from_target(target);
        let view = self.clone();
        async move {
            if let Some(click) = click {
                view.remove_participant(&click.activity, &click.email).await;
            }
        }
    }

    /// Show `message` and hide it once the timeout passes, unless a newer
    /// message has replaced it by then.
    pub(crate) async fn show_message(&self, message: StatusMessage) {
        let epoch = {
            let mut state = self.inner.state.lock().await;
            state.message_epoch += 1;
            state.page.show_message(message);
            state.message_epoch
        };

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.config.message_timeout).await;
            let mut state = inner.state.lock().await;
            if state.message_epoch == epoch {
                state.page.message.hidden = true;
            }
        });
    }

    async fn alert(&self, text: &str) {
        self.inner.state.lock().await.page.alerts.push(text.to_string());
    }
}
