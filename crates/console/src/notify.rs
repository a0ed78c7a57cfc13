//! User-facing notifications (toasts).

use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub description: String,
}

impl Toast {
    pub fn title(&self) -> &'static str {
        match self.kind {
            ToastKind::Success => "Success",
            ToastKind::Error => "Error",
        }
    }
}

/// Sink for transient notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);

    fn success(&self, description: &str) {
        self.notify(Toast {
            kind: ToastKind::Success,
            description: description.to_string(),
        });
    }

    fn error(&self, description: &str) {
        self.notify(Toast {
            kind: ToastKind::Error,
            description: description.to_string(),
        });
    }
}

/// Prints toasts to the terminal: successes on stdout, errors on stderr.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Success => {
                tracing::info!(message = %toast.description, "notification");
                println!("{}: {}", toast.title(), toast.description);
            }
            ToastKind::Error => {
                tracing::warn!(message = %toast.description, "notification");
                eprintln!("{}: {}", toast.title(), toast.description);
            }
        }
    }
}

/// Keeps every toast in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts().pop()
    }

    pub fn errors(&self) -> Vec<String> {
        self.toasts()
            .into_iter()
            .filter(|t| t.kind == ToastKind::Error)
            .map(|t| t.description)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }
}
