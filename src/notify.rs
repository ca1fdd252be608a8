//! User-facing notification messages.
//!
//! Modal controllers and page flows never render anything themselves; they
//! queue `Notice`s for the embedding view layer to display (toast, banner,
//! whatever the page uses).

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl Notice {
    pub fn new(message: String, level: NoticeLevel) -> Self {
        Self { message, level }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message.into(), NoticeLevel::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message.into(), NoticeLevel::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message.into(), NoticeLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), NoticeLevel::Error)
    }
}
