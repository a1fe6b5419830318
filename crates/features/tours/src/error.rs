use std::borrow::Cow;

/// A specialized [`ToursError`] enum of this crate.
#[bo_derive::bo_error]
pub enum ToursError {
    /// A tour file or directory could not be read.
    #[error("Tour file I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
    /// A tour file is not a JSON array of tour objects.
    #[error("Tour file parse error{}: {source}", format_context(.context))]
    Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },
    /// A configured filter pattern is not a valid regular expression.
    #[error("Tour filter error{}: {source}", format_context(.context))]
    Filter { source: regex::Error, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal tours error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
