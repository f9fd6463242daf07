use reqwest::Url;
use tracing::instrument;

use crate::api;
use crate::error::{Result, RosterError};
use crate::model::{MessageResponse, Roster};

/// Typed access to the activities API.
///
/// `ActivitiesClient` wraps a [`reqwest::Client`] together with the server's
/// base URL and exposes one method per endpoint.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> roster_view::Result<()> {
/// use roster_view::ActivitiesClient;
///
/// let client = ActivitiesClient::new("http://localhost:8000")?;
/// let roster = client.get_activities().await?;
/// println!("Found {} activities", roster.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ActivitiesClient {
    http: reqwest::Client,
    base: Url,
}

impl ActivitiesClient {
    /// Create a new client with default settings.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| RosterError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(RosterError::InvalidUrl(base_url.to_owned()));
        }
        Ok(Self { http: client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Fetch the complete roster.
    #[instrument(skip(self))]
    pub async fn get_activities(&self) -> Result<Roster> {
        api::activities::get_activities(&self.http, &self.base).await
    }

    /// Sign `email` up for `activity`, returning the server's confirmation.
    #[instrument(skip(self))]
    pub async fn signup(&self, activity: &str, email: &str) -> Result<MessageResponse> {
        api::activities::signup(&self.http, &self.base, activity, email).await
    }

    /// Remove `email` from the participants of `activity`.
    #[instrument(skip(self))]
    pub async fn unregister(&self, activity: &str, email: &str) -> Result<()> {
        api::activities::unregister(&self.http, &self.base, activity, email).await
    }
}
