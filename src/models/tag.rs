use serde::{Deserialize, Serialize};

/// A label attached to algorithms.
///
/// `id` is `None` for a tag typed in the console that the service has not
/// stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

impl Tag {
    /// A tag the service already knows about.
    pub fn existing(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// A tag created client-side, persisted on the next save.
    pub fn unsaved(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}
