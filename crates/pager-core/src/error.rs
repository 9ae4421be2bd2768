use crate::PageIndex;

/// Errors surfaced by the pager.
///
/// Only wiring defects and data source failures reach the caller. Transient
/// conditions (out-of-range indices during fast scrolling, a missing data
/// source, zero pages) are absorbed and degrade to a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerError {
    /// A page was dequeued with an identifier that was never registered.
    UnregisteredIdentifier { identifier: String },
    /// The data source could not produce the page at `index`.
    DataSource { index: PageIndex, reason: String },
}

impl PagerError {
    pub fn data_source(index: PageIndex, reason: impl Into<String>) -> Self {
        PagerError::DataSource {
            index,
            reason: reason.into(),
        }
    }

    /// Whether this error indicates a configuration defect in the host
    /// application rather than a runtime failure.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, PagerError::UnregisteredIdentifier { .. })
    }
}

impl std::fmt::Display for PagerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PagerError::UnregisteredIdentifier { identifier } => {
                write!(
                    f,
                    "page reuse identifier '{identifier}' did not match any registered kind"
                )
            }
            PagerError::DataSource { index, reason } => {
                write!(f, "data source failed to provide page {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for PagerError {}
