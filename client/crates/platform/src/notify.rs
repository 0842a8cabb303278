//! User Notices
//!
//! The toast boundary: library code describes outcomes as [`Notice`] values
//! and hands them to a [`Notifier`]; rendering is entirely the UI
//! collaborator's concern.

/// Visual tone of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Info,
    Success,
    Warning,
    Destructive,
}

impl NoticeVariant {
    pub const fn as_str(&self) -> &'static str {
        match self {
            NoticeVariant::Info => "info",
            NoticeVariant::Success => "success",
            NoticeVariant::Warning => "warning",
            NoticeVariant::Destructive => "destructive",
        }
    }
}

/// A user-visible notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        variant: NoticeVariant,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant,
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, NoticeVariant::Info)
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, NoticeVariant::Success)
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, NoticeVariant::Warning)
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, NoticeVariant::Destructive)
    }
}

/// Sink for user-visible notifications
///
/// Dispatch must be cheap and non-blocking; implementations forward to their
/// UI toolkit's toast mechanism (or a channel feeding it).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Default headless notifier: routes notices to the log stream.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.variant {
            NoticeVariant::Destructive | NoticeVariant::Warning => {
                tracing::warn!(
                    title = %notice.title,
                    description = %notice.description,
                    variant = notice.variant.as_str(),
                    "Notice"
                );
            }
            _ => {
                tracing::info!(
                    title = %notice.title,
                    description = %notice.description,
                    variant = notice.variant.as_str(),
                    "Notice"
                );
            }
        }
    }
}
