use crate::core::state::{SaveStatus, ViewState};
use crate::domain::model::{BlogPost, NewsletterContent, SaveRecord};
use crate::domain::ports::{CompletionClient, ContentFetcher, PersistenceClient};
use crate::utils::error::Result;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const GENERATE_ERROR_PREFIX: &str = "Failed to process and generate blog post: ";
pub const SAVE_ERROR_PREFIX: &str = "Failed to save post: ";

/// How a user action was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The action ran and its result is now in the view state.
    Completed,
    /// Another call was already in flight; nothing was started.
    Busy,
    /// Nothing to act on (save without a post).
    Skipped,
    /// A reset or a newer generation replaced the state while the call was in flight.
    Superseded,
}

struct Inner {
    view: ViewState,
    epoch: u64,
}

/// View model behind the sermon page.
///
/// The lock is never held across an outbound call. Every `generate` and
/// `reset` bumps an epoch; a call that finishes under an older epoch is
/// dropped instead of overwriting newer state.
pub struct SermonController<F: ContentFetcher, C: CompletionClient, P: PersistenceClient> {
    fetcher: F,
    completion: C,
    persistence: P,
    newsletter_url: String,
    inner: Mutex<Inner>,
}

impl<F: ContentFetcher, C: CompletionClient, P: PersistenceClient> SermonController<F, C, P> {
    pub fn new(fetcher: F, completion: C, persistence: P, newsletter_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            completion,
            persistence,
            newsletter_url: newsletter_url.into(),
            inner: Mutex::new(Inner {
                view: ViewState::Idle,
                epoch: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> ViewState {
        self.lock().view.clone()
    }

    pub async fn generate(&self) -> Dispatch {
        let epoch = {
            let mut inner = self.lock();
            if inner.view.is_busy() {
                tracing::warn!("Generate ignored: an operation is already in flight");
                return Dispatch::Busy;
            }
            inner.epoch += 1;
            inner.view = ViewState::Generating;
            inner.epoch
        };

        tracing::info!("Generating sermon (epoch {})", epoch);
        let outcome = self.fetch_and_generate().await;

        let mut inner = self.lock();
        if inner.epoch != epoch {
            tracing::warn!("Dropping stale generation result (epoch {})", epoch);
            return Dispatch::Superseded;
        }

        inner.view = match outcome {
            Ok((post, newsletter)) => {
                tracing::info!("Sermon ready: {}", post.title);
                ViewState::Displaying {
                    post,
                    newsletter,
                    save: SaveStatus::Unsaved,
                }
            }
            Err(e) => {
                tracing::error!("Generation failed: {}", e);
                ViewState::Failed {
                    message: format!("{}{}", GENERATE_ERROR_PREFIX, e),
                }
            }
        };
        Dispatch::Completed
    }

    async fn fetch_and_generate(&self) -> Result<(BlogPost, NewsletterContent)> {
        let newsletter = self.fetcher.fetch(&self.newsletter_url).await?;
        tracing::debug!("Fetched newsletter ({} bytes)", newsletter.len());
        let post = self.completion.generate(&newsletter).await?;
        Ok((post, newsletter))
    }

    pub async fn save(&self) -> Dispatch {
        let (epoch, record) = {
            let mut inner = self.lock();
            let record = match &mut inner.view {
                ViewState::Displaying {
                    save: SaveStatus::Saving,
                    ..
                } => {
                    tracing::warn!("Save ignored: a save is already in flight");
                    return Dispatch::Busy;
                }
                ViewState::Displaying {
                    post,
                    newsletter,
                    save,
                } => {
                    *save = SaveStatus::Saving;
                    SaveRecord::from_post(post, newsletter)
                }
                _ => {
                    tracing::debug!("Save skipped: no sermon to save");
                    return Dispatch::Skipped;
                }
            };
            (inner.epoch, record)
        };

        tracing::info!("Saving sermon: {}", record.title);
        let result = self.persistence.save(&record).await;

        let mut inner = self.lock();
        if inner.epoch != epoch {
            tracing::warn!("Dropping stale save result (epoch {})", epoch);
            return Dispatch::Superseded;
        }

        if let ViewState::Displaying { save, .. } = &mut inner.view {
            *save = match result {
                Ok(()) => {
                    tracing::info!("Sermon saved");
                    SaveStatus::Saved
                }
                Err(e) => {
                    tracing::error!("Save failed: {}", e);
                    SaveStatus::Failed(format!("{}{}", SAVE_ERROR_PREFIX, e))
                }
            };
        }
        Dispatch::Completed
    }

    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.epoch += 1;
        inner.view = ViewState::Idle;
        tracing::debug!("Reset to idle (epoch {})", inner.epoch);
    }
}
