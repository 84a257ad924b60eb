use async_graphql::SimpleObject;

/// A news item broadcast to `newsFeed` subscribers.
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct NewsEvent {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl NewsEvent {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
        }
    }
}
