use crate::client::Backend;
use crate::report::{Notifier, Visibility};

/// The live log display: an append-only text buffer.
///
/// Lines are never deduplicated; the backend is expected to hand out each
/// line once.
#[derive(Debug, Clone, Default)]
pub struct LogView {
    text: String,
    lines: usize,
    scroll_top: usize,
}

impl LogView {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Scroll position in bytes from the top of the buffer.
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn is_scrolled_to_bottom(&self) -> bool {
        self.scroll_top == self.text.len()
    }

    /// Append each line plus a newline and scroll to the bottom.
    ///
    /// An empty batch leaves the buffer and scroll position untouched.
    pub fn append(&mut self, batch: &[String]) {
        if batch.is_empty() {
            return;
        }
        for line in batch {
            self.text.push_str(line);
            self.text.push('\n');
        }
        self.lines += batch.len();
        self.scroll_top = self.text.len();
    }
}

/// One log poll cycle. Failures are dropped.
pub fn poll(backend: &dyn Backend, view: &mut LogView, notifier: &mut dyn Notifier) {
    match backend.logs() {
        Ok(batch) => view.append(&batch),
        Err(err) => Visibility::Silent.route(notifier, "Failed to poll logs", &err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeBackend;
    use crate::report::RecordingNotifier;

    #[test]
    fn batch_is_appended_with_newlines() {
        let backend = FakeBackend::new();
        backend.push_logs(&["a", "b"]);
        let mut view = LogView::default();
        let mut notifier = RecordingNotifier::new();

        poll(&backend, &mut view, &mut notifier);
        assert_eq!(view.text(), "a\nb\n");
        assert_eq!(view.line_count(), 2);
        assert!(view.is_scrolled_to_bottom());
    }

    #[test]
    fn empty_batch_changes_nothing() {
        let backend = FakeBackend::new();
        backend.push_logs(&["boot"]);
        backend.push_logs(&[]);
        let mut view = LogView::default();
        let mut notifier = RecordingNotifier::new();

        poll(&backend, &mut view, &mut notifier);
        let before = view.text().to_string();
        poll(&backend, &mut view, &mut notifier);
        assert_eq!(view.text(), before);
    }

    #[test]
    fn repeated_lines_are_kept() {
        let backend = FakeBackend::new();
        backend.push_logs(&["same"]);
        backend.push_logs(&["same"]);
        let mut view = LogView::default();
        let mut notifier = RecordingNotifier::new();

        poll(&backend, &mut view, &mut notifier);
        poll(&backend, &mut view, &mut notifier);
        assert_eq!(view.text(), "same\nsame\n");
    }

    #[test]
    fn failures_are_silent() {
        let backend = FakeBackend::new().failing("GET /logs");
        let mut view = LogView::default();
        let mut notifier = RecordingNotifier::new();

        poll(&backend, &mut view, &mut notifier);
        assert_eq!(view.text(), "");
        assert!(notifier.alerts.is_empty());
        assert!(notifier.console.is_empty());
    }
}
