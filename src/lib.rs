//! # Notideck - Notification Feed TUI
//!
//! A terminal dashboard presenting columns of notifications, built with Rust
//! and Ratatui. This library implements an Elm-like architecture for
//! predictable state management.
//!
//! ## Architecture Overview
//!
//! This crate is organized around the Elm architecture pattern:
//!
//! - **Model** (`core::state`): Immutable application state
//! - **Message** (`core::msg`): Events that can change the state
//! - **Update** (`core::update`): Pure functions that transform state
//! - **Command** (`core::cmd`): Side effects (fetching, logging)
//! - **View** (`components`): UI rendering based on current state
//!
//! The interesting part lives in [`core::feed`]: each column owns a feed
//! controller that derives the filtered view and the fetch-eligibility flag
//! from the raw subscription data, and turns user intent into page-numbered
//! fetch requests.
//!
//! ## Example Usage
//!
//! ```rust
//! use notideck::config::{ColumnConfig, Config};
//! use notideck::core::{msg::Msg, state::AppState, update::update};
//!
//! // Initialize state with one column
//! let config = Config {
//!     columns: vec![ColumnConfig {
//!         id: "inbox".to_string(),
//!         title: "Inbox".to_string(),
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//! let state = AppState::new(&config);
//!
//! // Process messages
//! let (state, cmds) = update(Msg::Refresh { column_id: "inbox".to_string() }, state);
//!
//! // The refresh produced exactly one page-1 fetch request
//! assert_eq!(cmds.len(), 1);
//! assert!(!state.system.should_quit);
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Elm architecture: state, messages, update, commands, feeds
//! - [`domain`] - Pure domain types: notifications, collections, filters, paging
//! - [`fetcher`] - The paged-fetch seam and command executor
//! - [`components`] - UI components
//! - [`config`] - Configuration management

#![allow(dead_code)]

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod domain;
pub mod fetcher;
pub mod tui;
pub mod utils;
pub mod widgets;

// Re-exports for convenience
pub use crate::core::{update, AppState, Cmd, FeedController, FeedView, LoadState, Msg};
pub use crate::fetcher::{CmdExecutor, NotificationSource, SampleSource};

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
