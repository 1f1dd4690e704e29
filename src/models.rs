use super::config::Config;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, sync::Arc};

#[derive(Clone, Debug)]
pub struct AppState {
    pub http: reqwest::Client,
    pub config: Arc<Config>,
}

/// Server-assigned note identifier. The notes service decides its shape,
/// so any JSON value is carried and written back as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub Value);

impl NoteId {
    pub fn is_missing(&self) -> bool {
        self.0.is_null()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Null => Ok(()),
            Value::String(id) => f.write_str(id),
            other => write!(f, "{other}"),
        }
    }
}

impl From<i64> for NoteId {
    fn from(id: i64) -> Self {
        NoteId(Value::from(id))
    }
}

impl From<&str> for NoteId {
    fn from(id: &str) -> Self {
        NoteId(Value::from(id))
    }
}

/// One entry of the collection, as the notes service returned it. Any entry
/// decodes: a missing or null field reads as empty, other values are shown
/// as their JSON text. Fields we do not know about are kept in `extra` so
/// they survive an edit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Value> for Note {
    fn from(entry: Value) -> Self {
        let mut fields = match entry {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        let id = NoteId(fields.remove("id").unwrap_or(Value::Null));
        let title = text(fields.remove("title"));
        let description = text(fields.remove("description"));

        Note {
            id,
            title,
            description,
            extra: fields,
        }
    }
}

fn text(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

/// Contents of the add/edit form while it is open.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Draft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<NoteId>,
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<&Note> for Draft {
    fn from(note: &Note) -> Self {
        Draft {
            id: (!note.id.is_missing()).then(|| note.id.clone()),
            title: note.title.clone(),
            description: note.description.clone(),
            extra: note.extra.clone(),
        }
    }
}

/// Whether a mutation response reports success. `success` is judged by
/// JavaScript truthiness since that is what the notes service was written
/// against; a missing field or a non-object body is a failure.
pub fn is_success(response: &Value) -> bool {
    response.get("success").map_or(false, is_truthy)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
