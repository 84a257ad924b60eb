use std::net::SocketAddr;
use std::time::Duration;

use api::app::build_router;
use api::gql::domains::news::EVENT_CREATED;
use api::gql::{build_schema, NewsSchema};
use api::{AppState, ServerConfig};
use async_graphql::{Request, Variables};
use tokio::net::TcpListener;

pub fn setup_test_state() -> AppState {
    AppState::new(ServerConfig::default())
}

/// Helper function to execute GraphQL queries and mutations
pub async fn execute_graphql(
    schema: &NewsSchema,
    query: &str,
    variables: Option<Variables>,
) -> async_graphql::Response {
    let mut request = Request::new(query);

    if let Some(vars) = variables {
        request = request.variables(vars);
    }

    schema.execute(request).await
}

/// Block until `expected` subscribers are listening on the news topic.
pub async fn wait_for_subscribers(state: &AppState, expected: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while state.pubsub.subscriber_count(EVENT_CREATED) < expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("Subscribers did not register in time");
}

/// Serve the full router on an ephemeral local port.
pub async fn spawn_server(state: AppState) -> SocketAddr {
    let schema = build_schema(state.clone());
    let app = build_router(state, schema);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    addr
}
