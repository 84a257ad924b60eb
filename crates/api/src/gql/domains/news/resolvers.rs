use async_graphql::{Context, Object, Result, Subscription};
use futures_util::{Stream, StreamExt};

use super::types::NewsEvent;
use crate::state::AppState;

/// Topic every created news event is published under.
pub const EVENT_CREATED: &str = "EVENT_CREATED";

#[derive(Default)]
pub struct NewsQuery;

#[Object]
impl NewsQuery {
    /// Unused field; a GraphQL schema needs at least one query.
    async fn placeholder(&self) -> Option<bool> {
        None
    }
}

#[derive(Default)]
pub struct NewsMutation;

#[Object]
impl NewsMutation {
    /// Publish a news event to all `newsFeed` subscribers and echo it back
    async fn create_news_event(
        &self,
        ctx: &Context<'_>,
        title: String,
        description: String,
    ) -> Result<NewsEvent> {
        let state = ctx.data::<AppState>()?;

        let event = NewsEvent::new(title, description);
        let delivered = state.pubsub.publish(EVENT_CREATED, event.clone());

        tracing::info!(
            topic = EVENT_CREATED,
            delivered,
            title = event.title.as_deref().unwrap_or_default(),
            "Published news event"
        );

        Ok(event)
    }
}

#[derive(Default)]
pub struct NewsSubscription;

#[Subscription]
impl NewsSubscription {
    /// Receive every news event created while the subscription is open
    async fn news_feed(&self, ctx: &Context<'_>) -> Result<impl Stream<Item = Option<NewsEvent>>> {
        let state = ctx.data::<AppState>()?;

        tracing::debug!(topic = EVENT_CREATED, "New newsFeed subscriber");

        Ok(state.pubsub.subscribe_stream(EVENT_CREATED).map(Some))
    }
}
