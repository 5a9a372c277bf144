use tracing::{debug, info, warn};

use super::{ClientRow, ClientView, Notice, NoticeKind};

/// A view that reports through `tracing` instead of drawing anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogView;

impl LogView {
    pub fn new() -> Self {
        LogView
    }
}

impl ClientView for LogView {
    fn render(&mut self, rows: &[ClientRow]) {
        info!(count = rows.len(), "clients rendered");
        for row in rows {
            debug!(
                id = %row.id,
                name = %row.name,
                email = %row.email,
                phone = %row.phone,
                "client row"
            );
        }
    }

    fn notify(&mut self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => info!(message = %notice.message, "notice"),
            NoticeKind::Error => warn!(message = %notice.message, "notice"),
        }
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        debug!(enabled, "submit control");
    }
}
