use serde::{Deserialize, Serialize};

/// Raw newsletter export text, kept only between fetch and save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsletterContent(String);

impl NewsletterContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<String> for NewsletterContent {
    fn from(text: String) -> Self {
        Self(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub body: String,
}

impl BlogPost {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// 複製用的完整文章：標題、空行、內文
    pub fn full_text(&self) -> String {
        format!("{}\n\n{}", self.title, self.body)
    }
}

/// One row of the `blog_posts` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub title: String,
    pub content: String,
    pub raw_newsletter_data: String,
}

impl SaveRecord {
    pub fn from_post(post: &BlogPost, newsletter: &NewsletterContent) -> Self {
        Self {
            title: post.title.clone(),
            content: post.body.clone(),
            raw_newsletter_data: newsletter.as_str().to_string(),
        }
    }
}
