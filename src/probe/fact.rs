//! Probe result types.

/// Placeholder for a probe whose library could not be loaded.
pub const NOT_FOUND: &str = "NOT FOUND!";

/// What the Ruby runtime returned for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactValue {
    /// The expression evaluated to a value.
    Value(String),
    /// The expression evaluated to `nil`.
    Nil,
    /// The required library raised `LoadError`.
    LoadError,
    /// Evaluation raised another exception (its class name).
    Error(String),
}

/// The local result of one fact probe: found, or unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fact {
    /// The fact, ready for display.
    Found(String),
    /// The fact could not be read.
    Unavailable,
}

impl Fact {
    /// Whether the fact was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Fact::Found(_))
    }

    /// The value, if found.
    pub fn value(&self) -> Option<&str> {
        match self {
            Fact::Found(v) => Some(v),
            Fact::Unavailable => None,
        }
    }

    /// Convert a lookup that may not have been answered at all.
    pub fn from_optional(value: Option<&FactValue>) -> Self {
        value.map(Fact::from).unwrap_or(Fact::Unavailable)
    }
}

impl From<&FactValue> for Fact {
    fn from(value: &FactValue) -> Self {
        match value {
            FactValue::Value(v) => Fact::Found(v.clone()),
            FactValue::Nil => Fact::Found("nil".to_string()),
            FactValue::LoadError | FactValue::Error(_) => Fact::Unavailable,
        }
    }
}

/// How a probe renders when its fact is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnMissing {
    /// Print the `NOT FOUND!` marker.
    NotFound,
    /// Print nothing for this line.
    Omit,
    /// Print a fixed placeholder.
    Text(&'static str),
}

impl OnMissing {
    /// The placeholder text, or `None` to omit the line.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            OnMissing::NotFound => Some(NOT_FOUND),
            OnMissing::Omit => None,
            OnMissing::Text(t) => Some(t),
        }
    }
}
