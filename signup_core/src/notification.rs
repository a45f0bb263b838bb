/// How loudly a notification should be shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// Informational, or good news
    #[default]
    Default,

    /// Something went wrong
    Destructive,
}

/// A short message for the user, shown outside the form itself (a toast, a
/// desktop notification...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Headline
    pub title: String,

    /// Details
    pub description: String,

    /// How to style it
    pub variant: Variant,
}

impl Notification {
    /// A normal notification
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Default,
        }
    }

    /// A notification about something going wrong
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: Variant::Destructive,
            ..Self::new(title, description)
        }
    }

    /// Is this bad news?
    pub fn is_destructive(&self) -> bool {
        self.variant == Variant::Destructive
    }
}
