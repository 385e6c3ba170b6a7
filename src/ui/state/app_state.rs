use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::session::{BatchMode, MergeSession};

pub struct AppState {
    pub session: Signal<MergeSession>,
    pub batch_mode: Signal<BatchMode>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new(default_mode: BatchMode) -> Self {
        Self {
            session: use_signal(MergeSession::default),
            batch_mode: use_signal(move || default_mode),
            busy: use_signal(|| false),
            status: use_signal(|| "就绪".to_string()),
        }
    }
}
