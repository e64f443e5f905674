/// Raw query text as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True when the text is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A rewritten form of a [`Query`] produced by expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryVariant<'q> {
    text: String,
    origin: &'q Query,
}

impl<'q> QueryVariant<'q> {
    pub fn new(text: impl Into<String>, origin: &'q Query) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }

    /// The unmodified query as a variant.
    pub fn original(origin: &'q Query) -> Self {
        Self::new(origin.as_str(), origin)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> &'q Query {
        self.origin
    }

    pub fn is_original(&self) -> bool {
        self.text == self.origin.as_str()
    }
}
