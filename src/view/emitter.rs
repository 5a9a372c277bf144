use event_emitter_rs::EventEmitter;
use serde::Deserialize;

use super::{ClientRow, ClientView, Notice};

/// Event carrying the rendered `Vec<ClientRow>`.
pub const RENDERED: &str = "clients:rendered";
/// Event carrying a [`Notice`].
pub const NOTICE: &str = "clients:notice";
/// Event carrying the submit control's `bool` state.
pub const SUBMIT_ENABLED: &str = "clients:submit_enabled";

/// A view that broadcasts every update to in-process listeners.
///
/// ```ignore
/// let mut view = EmitterView::new();
/// view.on(RENDERED, |rows: Vec<ClientRow>| {
///     println!("{} clients", rows.len());
/// });
/// let book = ClientBook::open(BookConfig::default(), view);
/// ```
pub struct EmitterView {
    emitter: EventEmitter,
}

impl Default for EmitterView {
    fn default() -> Self {
        Self::new()
    }
}

impl EmitterView {
    pub fn new() -> Self {
        Self::with_emitter(EventEmitter::new())
    }

    pub fn with_emitter(emitter: EventEmitter) -> Self {
        EmitterView { emitter }
    }

    /// Register a listener. Listeners run on their own thread.
    pub fn on<T, F>(&mut self, event: &str, listener: F)
    where
        for<'de> T: Deserialize<'de>,
        F: Fn(T) + Send + Sync + 'static,
    {
        self.emitter.on(event, listener);
    }

    pub fn into_emitter(self) -> EventEmitter {
        self.emitter
    }
}

impl ClientView for EmitterView {
    fn render(&mut self, rows: &[ClientRow]) {
        self.emitter.emit(RENDERED, rows.to_vec());
    }

    fn notify(&mut self, notice: Notice) {
        self.emitter.emit(NOTICE, notice);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.emitter.emit(SUBMIT_ENABLED, enabled);
    }
}
