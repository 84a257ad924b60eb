pub mod resolvers;
pub mod types;

pub use resolvers::{NewsMutation, NewsQuery, NewsSubscription, EVENT_CREATED};
pub use types::NewsEvent;
