use crate::schemas::Draft;
use url::{ParseError, Url};

/// Context holds information about the used draft and the current resolution
/// scope. The scope starts at the default root URL and is rebound to a
/// document URL when compilation descends into an externally loaded schema,
/// so references built inside it stay relative to that document.
#[derive(Debug)]
pub(crate) struct CompilationContext {
    pub(crate) scope: Url,
    pub(crate) draft: Draft,
}

impl CompilationContext {
    pub(crate) fn new(scope: Url, draft: Draft) -> Self {
        CompilationContext { scope, draft }
    }

    /// Build an absolute URL for a `$ref` value against the current scope.
    pub(crate) fn build_url(&self, reference: &str) -> Result<Url, ParseError> {
        Url::options().base_url(Some(&self.scope)).parse(reference)
    }
}
