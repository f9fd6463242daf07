mod activity;
mod message;

pub use activity::*;
pub use message::*;
