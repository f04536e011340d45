//! Source profiles: per-agent field extraction rules.
//!
//! Every supported agent sends the same lifecycle events with a slightly
//! different field vocabulary. A profile captures those differences as
//! data so one normalizer serves all agents. Status semantics never vary
//! by profile.

use crate::state::{SessionState, SessionStatus, is_tool_event, tool_display_name};
use serde_json::{Map, Value};

/// Identifier substituted when no usable session id can be resolved.
pub const UNKNOWN_SESSION_ID: &str = "unknown";

/// Placeholder some agents emit before a session is persisted.
const EPHEMERAL_SENTINEL: &str = "ephemeral";

/// Field extraction rules for one calling agent.
pub struct SourceProfile {
    /// Literal stamped into `SessionState::agent_type`
    pub agent_type: &'static str,
    /// Session id fields in preference order; empty values are skipped
    pub session_id_fields: &'static [&'static str],
    /// Whether a path-shaped session id embeds the real id in its filename
    pub session_id_from_path: bool,
    /// Scalar cwd fields in preference order, tried before workspace roots
    pub cwd_fields: &'static [&'static str],
    /// List-valued workspace roots field; first element is the cwd fallback
    pub workspace_roots_field: Option<&'static str>,
    /// Transcript path field, if the agent sends one
    pub transcript_path_field: Option<&'static str>,
    /// Extension rewrite applied to the transcript path (from, to)
    pub transcript_extension_rewrite: Option<(&'static str, &'static str)>,
}

/// Cursor IDE: conversation-scoped ids, workspace roots, and `.txt`
/// transcripts with a machine-readable `.jsonl` sibling.
pub const CURSOR: SourceProfile = SourceProfile {
    agent_type: "cursor",
    session_id_fields: &["conversation_id", "session_id"],
    session_id_from_path: false,
    cwd_fields: &[],
    workspace_roots_field: Some("workspace_roots"),
    transcript_path_field: Some("transcript_path"),
    transcript_extension_rewrite: Some((".txt", ".jsonl")),
};

/// Pi coding agent: `session_id` is the full path of the JSONL session
/// file; the stable id is the uuid embedded in the filename.
pub const PI: SourceProfile = SourceProfile {
    agent_type: "pi",
    session_id_fields: &["session_id"],
    session_id_from_path: true,
    cwd_fields: &["cwd"],
    workspace_roots_field: Some("workspace_roots"),
    transcript_path_field: None,
    transcript_extension_rewrite: None,
};

impl SourceProfile {
    /// Normalize an extracted payload into a canonical session state.
    ///
    /// Never fails: every missing or malformed field degrades to a
    /// documented default.
    pub fn normalize(&self, raw: &Map<String, Value>) -> SessionState {
        let event = str_field(raw, "hook_event_name")
            .unwrap_or_default()
            .to_string();

        let raw_session_id = self
            .session_id_fields
            .iter()
            .find_map(|field| str_field(raw, field).filter(|v| !v.is_empty()))
            .unwrap_or_default();

        let (mut session_id, mut transcript_path) =
            if self.session_id_from_path && raw_session_id.contains('/') {
                let (id, path) = split_path_session_id(raw_session_id);
                (id, Some(path))
            } else {
                (raw_session_id.to_string(), None)
            };

        if session_id.is_empty() || session_id == EPHEMERAL_SENTINEL {
            session_id = UNKNOWN_SESSION_ID.to_string();
        }

        if transcript_path.is_none() {
            transcript_path = self.resolve_transcript_path(raw);
        }

        let status = SessionStatus::from_event(&event);

        let mut state = SessionState {
            session_id,
            cwd: self.resolve_cwd(raw),
            event,
            agent_type: self.agent_type.to_string(),
            status,
            transcript_path,
            tool: None,
            tool_input: None,
            tool_use_id: None,
            tool_display: None,
        };

        if is_tool_event(&state.event) {
            let tool = str_field(raw, "tool_name").map(str::to_string);
            state.tool_display = tool
                .as_deref()
                .and_then(tool_display_name)
                .map(str::to_string);
            state.tool = tool;
            state.tool_input = Some(resolve_tool_input(raw));
            state.tool_use_id = str_field(raw, "tool_use_id")
                .filter(|id| !id.is_empty())
                .map(str::to_string);
        }

        state
    }

    fn resolve_cwd(&self, raw: &Map<String, Value>) -> String {
        for field in self.cwd_fields {
            if let Some(cwd) = str_field(raw, field)
                && !cwd.is_empty()
            {
                return cwd.to_string();
            }
        }

        if let Some(field) = self.workspace_roots_field
            && let Some(roots) = raw.get(field).and_then(Value::as_array)
            && let Some(first) = roots.first().and_then(Value::as_str)
        {
            return first.to_string();
        }

        String::new()
    }

    fn resolve_transcript_path(&self, raw: &Map<String, Value>) -> Option<String> {
        let path = str_field(raw, self.transcript_path_field?)?;
        if path.is_empty() {
            return None;
        }

        if let Some((from, to)) = self.transcript_extension_rewrite
            && let Some(stem) = path.strip_suffix(from)
        {
            return Some(format!("{stem}{to}"));
        }

        Some(path.to_string())
    }
}

/// Split a path-shaped session id into (identifier, transcript path).
///
/// Filenames look like `<timestamp>_<uuid>.jsonl`; the uuid is the stable
/// identifier. A basename without the `_` separator is used whole.
fn split_path_session_id(raw: &str) -> (String, String) {
    let basename = raw.rsplit('/').next().unwrap_or(raw);
    let stem = basename.strip_suffix(".jsonl").unwrap_or(basename);
    let id = match stem.split_once('_') {
        Some((_, id)) => id,
        None => stem,
    };
    (id.to_string(), raw.to_string())
}

/// Tool input may arrive JSON-encoded as a string; reparse it, degrading
/// to an empty object on an empty string or a parse failure. Anything
/// else passes through as-is.
fn resolve_tool_input(raw: &Map<String, Value>) -> Value {
    match raw.get("tool_input") {
        Some(Value::String(encoded)) => {
            if encoded.is_empty() {
                Value::Object(Map::new())
            } else {
                serde_json::from_str(encoded).unwrap_or_else(|_| Value::Object(Map::new()))
            }
        }
        Some(value) => value.clone(),
        None => Value::Object(Map::new()),
    }
}

fn str_field<'a>(raw: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    raw.get(field).and_then(Value::as_str)
}
