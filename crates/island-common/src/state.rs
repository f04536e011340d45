//! Canonical session state and status derivation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Session status shown by the display.
///
/// Derived from the hook event name with a fixed, total table. The table
/// is identical for every source profile; only field extraction differs
/// per agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Agent is working on a response
    Processing,
    /// A tool call is in flight
    RunningTool,
    /// Agent finished, waiting for the user
    WaitingForInput,
    /// Session is over
    Ended,
    /// Context window compacting
    Compacting,
    /// Unrecognized event
    #[default]
    Unknown,
}

impl SessionStatus {
    /// Map a hook event name to a status. Total over any input; event
    /// names outside the known vocabulary map to `Unknown`.
    pub fn from_event(event: &str) -> Self {
        match event {
            "beforeSubmitPrompt" => Self::Processing,
            "preToolUse" => Self::RunningTool,
            "postToolUse" => Self::Processing,
            "stop" | "subagentStop" | "sessionStart" => Self::WaitingForInput,
            "sessionEnd" => Self::Ended,
            "preCompact" => Self::Compacting,
            _ => Self::Unknown,
        }
    }
}

/// Events that carry tool fields worth forwarding.
pub(crate) fn is_tool_event(event: &str) -> bool {
    matches!(event, "preToolUse" | "postToolUse")
}

/// Raw tool identifier to display-name overrides.
///
/// Some agents use internal tool names the display should not surface.
const TOOL_DISPLAY_ALIASES: &[(&str, &str)] = &[("Shell", "Bash")];

/// Display-name override for a raw tool identifier, if one exists.
pub fn tool_display_name(tool: &str) -> Option<&'static str> {
    TOOL_DISPLAY_ALIASES
        .iter()
        .find(|(raw, _)| *raw == tool)
        .map(|(_, display)| *display)
}

/// Normalized session state, the wire record sent to the display.
///
/// `session_id`, `cwd`, `event`, `agent_type` and `status` are always
/// present. The optional fields are omitted from the JSON entirely when
/// unresolved, never serialized as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: String,
    pub cwd: String,
    /// Verbatim event name as received, not validated
    pub event: String,
    pub agent_type: String,
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_input: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_use_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_display: Option<String>,
}
