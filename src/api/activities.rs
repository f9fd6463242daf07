use reqwest::Url;
use tracing::{debug, instrument};

use crate::api::{self, decode, endpoint, rejection};
use crate::error::Result;
use crate::model::{MessageResponse, Roster};

#[instrument(skip(client))]
pub(crate) async fn get_activities(client: &reqwest::Client, base: &Url) -> Result<Roster> {
    let url = endpoint(base, &["activities"], None)?;
    let (status, body) = api::send(client.get(url.clone()), &url).await?;
    if !status.is_success() {
        return Err(rejection(&url, status, &body));
    }
    let roster: Roster = decode(&url, &body)?;
    debug!(count = roster.len(), "parsed roster");
    Ok(roster)
}

#[instrument(skip(client))]
pub(crate) async fn signup(
    client: &reqwest::Client,
    base: &Url,
    activity: &str,
    email: &str,
) -> Result<MessageResponse> {
    let url = endpoint(base, &["activities", activity, "signup"], Some(email))?;
    let (status, body) = api::send(client.post(url.clone()), &url).await?;
    if !status.is_success() {
        // A rejection without a JSON body is a malformed response, not a rejection.
        decode::<serde_json::Value>(&url, &body)?;
        return Err(rejection(&url, status, &body));
    }
    // Accepted signups only need to be JSON; a missing `message` is shown as empty.
    let value: serde_json::Value = decode(&url, &body)?;
    let message = value
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or_default()
        .to_owned();
    Ok(MessageResponse { message })
}

/// Remove `email` from `activity`. The success body is ignored, so an empty
/// or non-JSON 2xx still counts as removed.
#[instrument(skip(client))]
pub(crate) async fn unregister(
    client: &reqwest::Client,
    base: &Url,
    activity: &str,
    email: &str,
) -> Result<()> {
    let url = endpoint(base, &["activities", activity, "participants"], Some(email))?;
    let (status, body) = api::send(client.delete(url.clone()), &url).await?;
    if !status.is_success() {
        return Err(rejection(&url, status, &body));
    }
    Ok(())
}
