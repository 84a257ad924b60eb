use infra::PubSub;

use crate::config::ServerConfig;
use crate::gql::domains::news::NewsEvent;

#[derive(Clone)]
pub struct AppState {
    pub pubsub: PubSub<NewsEvent>,
    config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let pubsub = PubSub::new(config.pubsub_capacity);

        Self { pubsub, config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
