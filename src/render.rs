//! HTML for the activities list.
//!
//! Every server-provided string goes through [`escape_html`] before it is
//! placed into markup, including attribute values.

use itertools::Itertools;

use crate::model::{Activity, Roster};

pub const NO_PARTICIPANTS: &str = "No participants yet";
pub const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";
pub const SELECT_PLACEHOLDER: &str = "-- Select an activity --";

/// Class carried by every removal control; the delegated click handler
/// matches on it.
pub const DELETE_MARKER: &str = "delete-participant";

/// Escape `&`, `<`, `>`, `"` and `'` for use in element content and
/// quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// Render every activity card, in roster order.
pub fn render_activities(roster: &Roster) -> String {
    roster
        .iter()
        .map(|(name, activity)| render_card(name, activity))
        .join("")
}

/// Render a single activity card.
pub fn render_card(name: &str, activity: &Activity) -> String {
    format!(
        concat!(
            r#"<div class="activity-card">"#,
            "<h4>{name}</h4>",
            "<p>{description}</p>",
            "<p><strong>Schedule:</strong> {schedule}</p>",
            "<p><strong>Availability:</strong> {spots} spots left</p>",
            "{participants}",
            "</div>"
        ),
        name = escape_html(name),
        description = escape_html(&activity.description),
        schedule = escape_html(&activity.schedule),
        spots = activity.spots_left(),
        participants = render_participants(name, &activity.participants),
    )
}

fn render_participants(name: &str, participants: &[String]) -> String {
    if participants.is_empty() {
        return format!(
            r#"<div class="participants"><p class="no-participants">{NO_PARTICIPANTS}</p></div>"#
        );
    }

    let name = escape_html(name);
    let items = participants
        .iter()
        .map(|p| {
            let p = escape_html(p);
            format!(
                concat!(
                    "<li>",
                    r#"<span class="participant-badge">{p}</span>"#,
                    r#"<button class="{marker}" data-activity="{name}" data-email="{p}" title="Unregister participant">✕</button>"#,
                    "</li>"
                ),
                p = p,
                name = name,
                marker = DELETE_MARKER,
            )
        })
        .join("");

    format!(
        r#"<div class="participants"><h5>Participants ({count})</h5><ul class="participants-list">{items}</ul></div>"#,
        count = participants.len(),
    )
}

/// The static notice shown in place of the list when loading fails.
pub fn render_load_failure() -> String {
    format!("<p>{LOAD_FAILED}</p>")
}
