use std::io::Write;

use focusquest_core::{Mode, PhaseNotice, PhaseNotifier};

/// Prints phase notices to stderr and optionally rings the terminal bell.
pub struct TerminalNotifier {
    enabled: bool,
    bell: bool,
}

impl TerminalNotifier {
    pub fn new(enabled: bool, bell: bool) -> Self {
        Self { enabled, bell }
    }
}

impl PhaseNotifier for TerminalNotifier {
    fn phase_changed(&mut self, mode: Mode, notice: &PhaseNotice) {
        if !self.enabled {
            return;
        }
        tracing::debug!(%mode, "Phase notice");
        let mut stderr = std::io::stderr().lock();
        if self.bell {
            let _ = write!(stderr, "\x07");
        }
        let _ = writeln!(stderr, "[{}] {}", notice.title, notice.body);
    }
}
