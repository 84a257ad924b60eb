pub mod domains;
pub mod root;
pub mod schema;

pub use root::{MutationRoot, QueryRoot, SubscriptionRoot};
pub use schema::{build_schema, NewsSchema};
