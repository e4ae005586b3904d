//! The per-query owner of a cancellation token and a content snapshot,
//! scoped to the lifetime of one editor request.

use crate::cancellation::CancellationToken;
use langsvc_error::{LangSvcError, LangSvcResult};

/// One editor request's working state: the URI it targets, the content
/// snapshot taken once at query start (so a concurrent change cannot shift
/// positions mid-query), and its cancellation flag.
pub struct QuerySession<'a> {
    pub uri: &'a str,
    pub text: String,
    pub cancellation: CancellationToken,
}

impl<'a> QuerySession<'a> {
    pub fn new(uri: &'a str, text: String, cancellation: CancellationToken) -> Self {
        Self { uri, text, cancellation }
    }

    /// Returns `Err(LangSvcError::Cancelled)` if cancellation was requested.
    /// Called between the expensive steps spec.md §5 names; a query never
    /// checks mid-step.
    pub fn checkpoint(&self) -> LangSvcResult<()> {
        if self.cancellation.is_cancelled() {
            return Err(LangSvcError::Cancelled);
        }
        Ok(())
    }
}
