/// A discovered job listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    /// Extracted title text; empty when the title pattern matched nothing.
    pub title: String,
    pub url: String,
}

impl JobRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}
