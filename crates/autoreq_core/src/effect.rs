use crate::RequestId;

/// Side effects requested by [`crate::update`]; the shell executes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send one analysis request for `github_url`.
    SubmitAnalysis {
        request_id: RequestId,
        github_url: String,
    },
    /// Abort a request that a newer submission superseded.
    CancelAnalysis { request_id: RequestId },
    CopyToClipboard { text: String },
    SaveManifest { text: String },
}
