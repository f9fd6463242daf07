use itertools::Itertools;
use scraper::Html;
use serde::Serialize;

use crate::model::{MessageKind, Roster, StatusMessage};
use crate::render::{self, escape_html, SELECT_PLACEHOLDER};

pub const LOADING: &str = "<p>Loading activities...</p>";

/// The four regions of the document the view owns, plus the alerts it raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Inner HTML of the activities list container.
    pub activities_list: String,
    /// Options of the activity select, placeholder first.
    pub activity_select: Vec<SelectOption>,
    pub form: SignupForm,
    pub message: MessageArea,
    /// Blocking alerts, oldest first.
    pub alerts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignupForm {
    pub activity: String,
    pub email: String,
}

impl SignupForm {
    pub fn reset(&mut self) {
        self.activity.clear();
        self.email.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageArea {
    pub text: String,
    pub kind: Option<MessageKind>,
    pub hidden: bool,
}

impl MessageArea {
    /// The class attribute the message element carries, e.g. `"error hidden"`.
    pub fn class_name(&self) -> String {
        self.kind
            .map(|k| k.to_string())
            .into_iter()
            .chain(self.hidden.then(|| "hidden".to_string()))
            .join(" ")
    }

    /// The message currently on screen, if any.
    pub fn visible(&self) -> Option<StatusMessage> {
        if self.hidden {
            return None;
        }
        self.kind.map(|kind| StatusMessage {
            text: self.text.clone(),
            kind,
        })
    }
}

impl Default for MessageArea {
    fn default() -> Self {
        Self {
            text: String::new(),
            kind: None,
            hidden: true,
        }
    }
}

impl Page {
    /// Replace the list and the select with a fresh rendering of `roster`.
    ///
    /// Rebuilding the select drops the current selection.
    pub(crate) fn render_roster(&mut self, roster: &Roster) {
        self.activities_list = render::render_activities(roster);
        self.activity_select = std::iter::once(SelectOption::placeholder())
            .chain(roster.names().map(|name| SelectOption {
                value: name.to_string(),
                label: name.to_string(),
            }))
            .collect();
        self.form.activity.clear();
    }

    pub(crate) fn render_load_failure(&mut self) {
        self.activities_list = render::render_load_failure();
    }

    pub(crate) fn show_message(&mut self, message: StatusMessage) {
        self.message = MessageArea {
            text: message.text,
            kind: Some(message.kind),
            hidden: false,
        };
    }

    /// Hand over the alerts raised so far, leaving none behind.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Parse the activities list so clicks can be dispatched against it.
    pub fn list_document(&self) -> Html {
        Html::parse_fragment(&self.activities_list)
    }

    /// Markup for the select's option list.
    pub fn select_html(&self) -> String {
        self.activity_select
            .iter()
            .map(|o| {
                format!(
                    r#"<option value="{}">{}</option>"#,
                    escape_html(&o.value),
                    escape_html(&o.label)
                )
            })
            .join("")
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            activities_list: LOADING.to_string(),
            activity_select: vec![SelectOption::placeholder()],
            form: SignupForm::default(),
            message: MessageArea::default(),
            alerts: Vec::new(),
        }
    }
}

impl SelectOption {
    fn placeholder() -> Self {
        Self {
            value: String::new(),
            label: SELECT_PLACEHOLDER.to_string(),
        }
    }
}
