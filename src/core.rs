//! Elm-style application core.
//!
//! - **Model** ([`state`]): immutable application state
//! - **Message** ([`msg`]): events that can change the state
//! - **Update** ([`update()`]): pure state transitions
//! - **Command** ([`cmd`]): side effects requested by transitions
//! - **Feed** ([`feed`]): per-column derived views and fetch triggers

pub mod cmd;
pub mod feed;
pub mod msg;
pub mod state;
pub mod update;

pub use cmd::{Cmd, CmdResult};
pub use feed::{FeedController, FeedView};
pub use msg::Msg;
pub use state::{AppState, LoadState, SubscriptionData};
pub use update::update;
