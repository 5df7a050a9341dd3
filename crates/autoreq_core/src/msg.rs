use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User replaced the whole URL input.
    InputChanged(String),
    /// User typed one character into the URL input.
    InputCharTyped(char),
    /// User deleted the last character of the URL input.
    InputBackspace,
    /// User submitted the form.
    Submitted,
    /// Engine resolution for a request.
    AnalysisResolved {
        request_id: crate::RequestId,
        outcome: Result<String, crate::FailureReason>,
    },
    /// User asked to copy the manifest.
    CopyClicked,
    /// Clipboard write finished (error text on failure).
    CopyFinished(Result<(), String>),
    /// User asked to save the manifest to disk.
    SaveClicked,
    /// Manifest write finished.
    SaveFinished(Result<PathBuf, String>),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
