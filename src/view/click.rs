use scraper::ElementRef;

use crate::render::DELETE_MARKER;

/// A removal requested by clicking inside the activities list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListClick {
    pub activity: String,
    pub email: String,
}

impl ListClick {
    /// Resolve a click on `target` the way a delegated listener on the list
    /// container would: find the closest removal control (the target itself
    /// or an ancestor) and read the data it carries.
    ///
    /// Returns `None` when the click did not land on a removal control or
    /// the control lacks either value.
    pub fn from_target(target: ElementRef<'_>) -> Option<Self> {
        let control = std::iter::once(target)
            .chain(target.ancestors().filter_map(ElementRef::wrap))
            .find(|e| e.value().classes().any(|c| c == DELETE_MARKER))?;

        let activity = control.value().attr("data-activity").filter(|s| !s.is_empty())?;
        let email = control.value().attr("data-email").filter(|s| !s.is_empty())?;
        Some(Self {
            activity: activity.to_string(),
            email: email.to_string(),
        })
    }
}
