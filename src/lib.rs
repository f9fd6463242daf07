//! A headless view controller for an extracurricular activities roster.
//!
//! [`RosterView`] fetches the roster from the activities API, renders it into
//! a [`Page`], and keeps it in sync as participants sign up or are removed.

pub use client::ActivitiesClient;
pub use error::{Result, RosterError};
pub use model::*;
pub use view::{ListClick, Page, RosterView, ViewConfig};

mod api;
mod client;
mod error;
pub mod model;
pub mod render;
pub mod view;
