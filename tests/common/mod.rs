//! An in-process stand-in for the activities API.

use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use roster_view::{Activity, ActivitiesClient, RosterView, ViewConfig};
use serde_json::json;
use tokio::sync::{oneshot, Mutex};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Reply};

/// How the server phrases its failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum ErrorBody {
    /// `{"detail": "..."}`
    Detail,
    /// `{}`
    NoDetail,
    /// Zero-length body.
    Empty,
}

/// What the server sends back when a mutation succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum SuccessBody {
    /// `{"message": "..."}`
    Message,
    /// `{"status": "ok"}`
    NoMessage,
    /// Zero-length body.
    Empty,
    /// An HTML page instead of JSON.
    Html,
}

/// A roster request parked by [`MockServer::hold_next_get`].
#[derive(Debug)]
struct Gate {
    seen: oneshot::Sender<BTreeMap<String, Activity>>,
    release: oneshot::Receiver<()>,
}

/// Handle on a parked roster request.
pub struct HeldGet {
    /// Resolves with the roster the parked request will answer with, once it
    /// has reached the server.
    pub seen: oneshot::Receiver<BTreeMap<String, Activity>>,
    /// Send to let the parked request answer.
    pub release: oneshot::Sender<()>,
}

#[derive(Debug)]
pub struct ServerState {
    pub activities: BTreeMap<String, Activity>,
    pub gets: usize,
    pub error_body: ErrorBody,
    pub success_body: SuccessBody,
    pub garbage_roster: bool,
    held_get: Option<Gate>,
}

type Shared = Arc<Mutex<ServerState>>;

pub struct MockServer {
    pub addr: SocketAddr,
    pub state: Shared,
}

#[allow(dead_code)]
impl MockServer {
    pub async fn start(activities: &[(&str, Activity)]) -> Self {
        let state: Shared = Arc::new(Mutex::new(ServerState {
            activities: activities
                .iter()
                .map(|(name, a)| (name.to_string(), a.clone()))
                .collect(),
            gets: 0,
            error_body: ErrorBody::Detail,
            success_body: SuccessBody::Message,
            garbage_roster: false,
            held_get: None,
        }));

        let with_state = {
            let state = state.clone();
            warp::any().map(move || state.clone())
        };

        let list = warp::get()
            .and(warp::path!("activities"))
            .and(with_state.clone())
            .and_then(list);
        let signup = warp::post()
            .and(warp::path!("activities" / String / "signup"))
            .and(warp::query::<HashMap<String, String>>())
            .and(with_state.clone())
            .and_then(signup);
        let unregister = warp::delete()
            .and(warp::path!("activities" / String / "participants"))
            .and(warp::query::<HashMap<String, String>>())
            .and(with_state)
            .and_then(unregister);

        let (addr, server) =
            warp::serve(list.or(signup).or(unregister)).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn view(&self) -> RosterView {
        let client = ActivitiesClient::new(&self.url()).unwrap();
        RosterView::with_client(client, ViewConfig::new(self.url()))
    }

    pub async fn gets(&self) -> usize {
        self.state.lock().await.gets
    }

    pub async fn participants(&self, activity: &str) -> Vec<String> {
        self.state.lock().await.activities[activity].participants.clone()
    }

    pub async fn add_participant(&self, activity: &str, email: &str) {
        self.state
            .lock()
            .await
            .activities
            .get_mut(activity)
            .unwrap()
            .participants
            .push(email.to_string());
    }

    /// Park the next roster request after it has taken its snapshot, until
    /// the returned handle releases it.
    pub async fn hold_next_get(&self) -> HeldGet {
        let (seen_tx, seen_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.state.lock().await.held_get = Some(Gate {
            seen: seen_tx,
            release: release_rx,
        });
        HeldGet {
            seen: seen_rx,
            release: release_tx,
        }
    }

    pub async fn set_success_body(&self, body: SuccessBody) {
        self.state.lock().await.success_body = body;
    }

    pub async fn set_error_body(&self, body: ErrorBody) {
        self.state.lock().await.error_body = body;
    }

    pub async fn serve_garbage_roster(&self) {
        self.state.lock().await.garbage_roster = true;
    }
}

pub fn activity(max_participants: u32, participants: &[&str]) -> Activity {
    Activity {
        description: "Learn strategies and compete".to_string(),
        schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
        max_participants,
        participants: participants.iter().map(|p| p.to_string()).collect(),
    }
}

/// Path parameters reach the handlers still percent-encoded.
fn decode_segment(segment: &str) -> String {
    let segment = segment.replace('+', "%2B").replace('&', "%26");
    let url = reqwest::Url::parse(&format!("http://localhost/?v={segment}")).unwrap();
    url.query_pairs()
        .next()
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default()
}

fn failure(error_body: ErrorBody, status: StatusCode, detail: &str) -> Response {
    match error_body {
        ErrorBody::Detail => {
            warp::reply::with_status(warp::reply::json(&json!({ "detail": detail })), status)
                .into_response()
        }
        ErrorBody::NoDetail => {
            warp::reply::with_status(warp::reply::json(&json!({})), status).into_response()
        }
        ErrorBody::Empty => warp::reply::with_status("", status).into_response(),
    }
}

fn missing_email() -> Response {
    warp::reply::with_status(
        warp::reply::json(&json!({ "detail": [{ "loc": ["query", "email"], "msg": "Field required" }] })),
        StatusCode::UNPROCESSABLE_ENTITY,
    )
    .into_response()
}

fn success(success_body: SuccessBody, message: String) -> Response {
    match success_body {
        SuccessBody::Message => warp::reply::json(&json!({ "message": message })).into_response(),
        SuccessBody::NoMessage => warp::reply::json(&json!({ "status": "ok" })).into_response(),
        SuccessBody::Empty => warp::reply::with_status("", StatusCode::OK).into_response(),
        SuccessBody::Html => warp::reply::html("<html>OK</html>").into_response(),
    }
}

async fn list(state: Shared) -> Result<Response, Infallible> {
    let (body, parked) = {
        let mut state = state.lock().await;
        state.gets += 1;
        let snapshot = state.activities.clone();
        let body = if state.garbage_roster {
            warp::reply::html("<html>502 Bad Gateway</html>").into_response()
        } else {
            warp::reply::json(&snapshot).into_response()
        };
        (body, state.held_get.take().map(|gate| (gate, snapshot)))
    };
    if let Some((gate, snapshot)) = parked {
        let _ = gate.seen.send(snapshot);
        let _ = gate.release.await;
    }
    Ok(body)
}

async fn signup(
    activity: String,
    query: HashMap<String, String>,
    state: Shared,
) -> Result<Response, Infallible> {
    let activity = decode_segment(&activity);
    let Some(email) = query.get("email") else {
        return Ok(missing_email());
    };

    let mut state = state.lock().await;
    let error_body = state.error_body;
    let success_body = state.success_body;
    let Some(entry) = state.activities.get_mut(&activity) else {
        return Ok(failure(error_body, StatusCode::NOT_FOUND, "Activity not found"));
    };
    if entry.participants.contains(email) {
        return Ok(failure(
            error_body,
            StatusCode::BAD_REQUEST,
            "Student already signed up for this activity",
        ));
    }
    if entry.participants.len() >= entry.max_participants as usize {
        return Ok(failure(error_body, StatusCode::BAD_REQUEST, "Activity full"));
    }
    entry.participants.push(email.clone());
    Ok(success(
        success_body,
        format!("Signed up {email} for {activity}"),
    ))
}

async fn unregister(
    activity: String,
    query: HashMap<String, String>,
    state: Shared,
) -> Result<Response, Infallible> {
    let activity = decode_segment(&activity);
    let Some(email) = query.get("email") else {
        return Ok(missing_email());
    };

    let mut state = state.lock().await;
    let error_body = state.error_body;
    let success_body = state.success_body;
    let Some(entry) = state.activities.get_mut(&activity) else {
        return Ok(failure(error_body, StatusCode::NOT_FOUND, "Activity not found"));
    };
    let Some(index) = entry.participants.iter().position(|p| p == email) else {
        return Ok(failure(error_body, StatusCode::NOT_FOUND, "Participant not found"));
    };
    entry.participants.remove(index);
    Ok(success(
        success_body,
        format!("Removed {email} from {activity}"),
    ))
}
