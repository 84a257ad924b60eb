pub mod mutation_root;
pub mod query_root;
pub mod subscription_root;

pub use mutation_root::MutationRoot;
pub use query_root::QueryRoot;
pub use subscription_root::SubscriptionRoot;
