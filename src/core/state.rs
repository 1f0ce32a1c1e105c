use crate::domain::model::{BlogPost, NewsletterContent};

pub const LOADING_MESSAGE: &str = "OMEGA is interpreting the reflections...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Unsaved,
    Saving,
    Saved,
    Failed(String),
}

impl SaveStatus {
    /// Short status label shown next to the save action.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            SaveStatus::Unsaved => None,
            SaveStatus::Saving => Some("Saving..."),
            SaveStatus::Saved => Some("Saved!"),
            SaveStatus::Failed(_) => Some("Save Failed"),
        }
    }
}

/// What the presentation layer renders. The post and the newsletter it was
/// generated from only ever exist together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Generating,
    Displaying {
        post: BlogPost,
        newsletter: NewsletterContent,
        save: SaveStatus,
    },
    Failed {
        message: String,
    },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Generating)
    }

    pub fn is_saving(&self) -> bool {
        matches!(
            self,
            ViewState::Displaying {
                save: SaveStatus::Saving,
                ..
            }
        )
    }

    /// An outbound call is in flight.
    pub fn is_busy(&self) -> bool {
        self.is_loading() || self.is_saving()
    }

    pub fn post(&self) -> Option<&BlogPost> {
        match self {
            ViewState::Displaying { post, .. } => Some(post),
            _ => None,
        }
    }

    pub fn raw_newsletter(&self) -> &str {
        match self {
            ViewState::Displaying { newsletter, .. } => newsletter.as_str(),
            _ => "",
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn save_status(&self) -> Option<&SaveStatus> {
        match self {
            ViewState::Displaying { save, .. } => Some(save),
            _ => None,
        }
    }

    pub fn save_success(&self) -> bool {
        matches!(self.save_status(), Some(SaveStatus::Saved))
    }

    pub fn save_error(&self) -> Option<&str> {
        match self.save_status() {
            Some(SaveStatus::Failed(message)) => Some(message),
            _ => None,
        }
    }
}
