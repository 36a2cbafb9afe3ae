//! Glbind error handling.

use std::fmt;

/// A specialized [`Result`] type for binding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for all the binding operations.
#[derive(Debug, Clone)]
pub struct Error {
    /// The raw GL error code, in case the failure came from the driver.
    raw_code: Option<i64>,

    /// Extra detail, like the name of the symbol that couldn't be resolved.
    detail: Option<String>,

    /// The simplified error kind to handle matching.
    kind: ErrorKind,
}

impl Error {
    pub(crate) fn new(raw_code: Option<i64>, detail: Option<String>, kind: ErrorKind) -> Self {
        Self { raw_code, detail, kind }
    }

    /// Build the error reported when the resolver has no address for
    /// `symbol`.
    pub(crate) fn symbol_not_found(symbol: &str) -> Self {
        Self::new(None, Some(symbol.to_owned()), ErrorKind::SymbolNotFound)
    }

    /// Helper to check that error is [`ErrorKind::NotSupported`].
    #[inline]
    pub fn not_supported(&self) -> bool {
        matches!(&self.kind, ErrorKind::NotSupported(_))
    }

    /// The underlying error kind.
    #[inline]
    pub fn error_kind(&self) -> ErrorKind {
        self.kind
    }

    /// The underlying raw code in case it's present.
    #[inline]
    pub fn raw_code(&self) -> Option<i64> {
        self.raw_code
    }

    /// The native name of the symbol the resolver failed to find.
    ///
    /// Only present for [`ErrorKind::SymbolNotFound`].
    pub fn missing_symbol(&self) -> Option<&str> {
        match self.kind {
            ErrorKind::SymbolNotFound => self.detail.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(raw_code) = self.raw_code {
            write!(f, "[{raw_code:x}] ")?;
        }

        match self.detail.as_ref() {
            Some(detail) => write!(f, "{}: {detail}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Error {}

/// Build an error with just a kind.
impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error { raw_code: None, detail: None, kind }
    }
}

/// A list specifying general categories of binding errors.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum ErrorKind {
    /// The resolver returned no address for a required entry point.
    SymbolNotFound,

    /// None of the candidate GL libraries could be opened.
    LibraryNotFound,

    /// The operation needs a bound table, but binding never succeeded.
    NotInitialized,

    /// The driver reported a version string that couldn't be parsed.
    BadVersionString,

    /// The operation is not supported by the platform.
    NotSupported(&'static str),

    /// The misc error that can't be classified occurred.
    Misc,
}

impl ErrorKind {
    pub(crate) fn as_str(&self) -> &'static str {
        use ErrorKind::*;
        match *self {
            SymbolNotFound => "required GL symbol could not be resolved",
            LibraryNotFound => "no GL library could be loaded",
            NotInitialized => "GL bindings are not initialized",
            BadVersionString => "the GL version string could not be parsed",
            NotSupported(reason) => reason,
            Misc => "misc binding error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_symbol_is_only_reported_for_lookup_failures() {
        let err = Error::symbol_not_found("glGetStringi");
        assert_eq!(err.error_kind(), ErrorKind::SymbolNotFound);
        assert_eq!(err.missing_symbol(), Some("glGetStringi"));

        let err = Error::new(None, Some("libGL.so.1".into()), ErrorKind::LibraryNotFound);
        assert_eq!(err.missing_symbol(), None);
    }

    #[test]
    fn display_includes_code_and_detail() {
        let err = Error::new(Some(0x500), Some("glGetIntegerv".into()), ErrorKind::Misc);
        assert_eq!(err.to_string(), "[500] misc binding error: glGetIntegerv");

        let err: Error = ErrorKind::NotInitialized.into();
        assert_eq!(err.to_string(), "GL bindings are not initialized");
    }
}
