/// Submit control label while no request is outstanding.
pub const SUBMIT_LABEL_IDLE: &str = "Generate";
/// Submit control label while a request is in flight.
pub const SUBMIT_LABEL_BUSY: &str = "Generating.";
pub const RESULT_PANEL_TITLE: &str = "requirements.txt";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub submit_label: String,
    pub input_editable: bool,
    pub busy: bool,
    /// Shown only when a request succeeded with a non-empty manifest.
    pub result_panel: Option<ResultPanelView>,
    pub error: Option<String>,
    pub validation: Option<String>,
    pub notice: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanelView {
    pub title: String,
    pub manifest: String,
}
