use super::{ClientRow, ClientView, Notice};

/// A view that keeps what it was given, for tests and headless use.
#[derive(Debug, Clone, Default)]
pub struct BufferView {
    rows: Vec<ClientRow>,
    renders: usize,
    notices: Vec<Notice>,
    submit_enabled: bool,
}

impl BufferView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows of the most recent render.
    pub fn rows(&self) -> &[ClientRow] {
        &self.rows
    }

    /// How many times the list was rendered.
    pub fn renders(&self) -> usize {
        self.renders
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }
}

impl ClientView for BufferView {
    fn render(&mut self, rows: &[ClientRow]) {
        self.rows = rows.to_vec();
        self.renders += 1;
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }
}
