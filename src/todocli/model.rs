use std::borrow::Cow;
use std::fmt;

/// Key under which the last issued identifier lives in the `idgen` mapping.
pub const COUNTER_KEY: &str = "id";

/// A positive identifier issued by the store's counter.
///
/// On disk it is the decimal text of the number, which is also its `Display` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(u64);

impl Identifier {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The key this identifier is stored under in the `todos` mapping.
    pub fn key(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the `todos` mapping.
///
/// `id` is the raw key as stored; `text` is whatever bytes the caller supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub text: Vec<u8>,
}

impl TodoItem {
    pub fn new(id: impl Into<String>, text: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }
}
