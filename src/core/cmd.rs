use serde::{Deserialize, Serialize};

use crate::core::msg::Msg;
use crate::core::state::ColumnId;

/// Command definitions: side effects requested by the update function and
/// executed by the runtime. A command captures application intent (what to
/// fetch), while the executor decides how, keeping the update function pure
/// and the fetch collaborator swappable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmd {
    /// Request one page of a column's subscription from the fetch
    /// collaborator. Fire-and-forget: the outcome arrives later as fetch
    /// lifecycle messages, never as a return value.
    FetchPage {
        column_id: ColumnId,
        page: usize,
        per_page: usize,
    },

    // Logging related
    LogError {
        message: String,
    },
    LogInfo {
        message: String,
    },

    // Batch command (execute multiple commands together)
    Batch(Vec<Cmd>),

    // Do nothing (for testing)
    None,
}

impl Cmd {
    /// Combine multiple commands into one
    pub fn batch(commands: Vec<Cmd>) -> Cmd {
        match commands.len() {
            0 => Cmd::None,
            1 => commands.into_iter().next().unwrap_or(Cmd::None),
            _ => Cmd::Batch(commands),
        }
    }

    /// Whether the command requires asynchronous processing
    pub fn is_async(&self) -> bool {
        match self {
            Cmd::FetchPage { .. } => true,
            Cmd::LogError { .. } | Cmd::LogInfo { .. } | Cmd::None => false,
            Cmd::Batch(cmds) => cmds.iter().any(|cmd| cmd.is_async()),
        }
    }

    /// Get command priority (smaller numbers = higher priority)
    pub fn priority(&self) -> u8 {
        match self {
            Cmd::FetchPage { .. } => 1,
            Cmd::LogError { .. } | Cmd::LogInfo { .. } => 4,
            Cmd::Batch(cmds) => cmds.iter().map(|cmd| cmd.priority()).min().unwrap_or(255),
            Cmd::None => 255,
        }
    }
}

/// Command execution result
#[derive(Debug, Clone)]
pub enum CmdResult {
    /// Success (may generate new messages)
    Success(Vec<Msg>),
    /// Error
    Error(String),
    /// Still executing (for async commands)
    Pending,
}
