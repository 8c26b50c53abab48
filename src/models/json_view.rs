use std::sync::Arc;

use serde_json::Value;

static NULL: Value = Value::Null;

/// Holds exactly one server payload, shared and never mutated.
///
/// Typed views keep one of these next to the values they derive so the UI can
/// still reach fields the view does not model. A view over part of a larger
/// document shares the document and remembers a JSON pointer into it.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonView {
    root: Arc<Value>,
    pointer: String,
}

impl JsonView {
    pub fn new(json: Value) -> Self {
        Self {
            root: Arc::new(json),
            pointer: String::new(),
        }
    }

    /// A view of the value at `pointer` (RFC 6901, relative to this view)
    /// sharing the same document. `None` if nothing is there.
    pub fn child(&self, pointer: &str) -> Option<Self> {
        let pointer = format!("{}{}", self.pointer, pointer);
        self.root.pointer(&pointer)?;
        Some(Self {
            root: Arc::clone(&self.root),
            pointer,
        })
    }

    pub fn json(&self) -> &Value {
        // `child` only hands out pointers that resolve.
        self.root.pointer(&self.pointer).unwrap_or(&NULL)
    }
}

impl From<Value> for JsonView {
    fn from(json: Value) -> Self {
        Self::new(json)
    }
}
