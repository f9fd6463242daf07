pub(crate) mod activities;

use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Result, RosterError};

/// Build `{base}/{segments...}?email={email}` with every segment and the
/// query value percent-encoded.
pub(crate) fn endpoint(base: &Url, segments: &[&str], email: Option<&str>) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| RosterError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    url.set_query(None);
    if let Some(email) = email {
        url.query_pairs_mut().append_pair("email", email);
    }
    Ok(url)
}

/// Send a request and read the full body, without judging the status.
pub(crate) async fn send(request: RequestBuilder, url: &Url) -> Result<(StatusCode, String)> {
    debug!(%url, "sending request");

    let response = request.send().await.map_err(|e| RosterError::Http {
        url: url.to_string(),
        source: e,
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| RosterError::ResponseBody {
        url: url.to_string(),
        source: e,
    })?;

    debug!(%url, %status, bytes = body.len(), "received response");
    Ok((status, body))
}

pub(crate) fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| RosterError::Decode {
        url: url.to_string(),
        source: e,
    })
}

/// Map a non-success response to [`RosterError::Rejected`], keeping the
/// server's `detail` when the body carries a string one.
pub(crate) fn rejection(url: &Url, status: StatusCode, body: &str) -> RosterError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_owned));
    RosterError::Rejected {
        url: url.to_string(),
        status,
        detail,
    }
}
