//! Reusable render widgets.

pub mod notification_row;

pub use notification_row::NotificationRow;
