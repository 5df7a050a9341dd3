//! Autoreq core: pure submission state machine and view-model helpers.
mod catalog;
mod effect;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use catalog::{
    AboutSection, Brand, Hero, InfoCard, Service, ABOUT, BRANDS, HERO, SERVICES,
};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, FailureCategory, FailureReason, RequestId, RequestStatus};
pub use update::update;
pub use validate::validate_repo_url;
pub use view_model::{
    AppViewModel, ResultPanelView, RESULT_PANEL_TITLE, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE,
};
