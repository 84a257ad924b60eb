use async_graphql::MergedSubscription;

use crate::gql::domains::news::NewsSubscription;

#[derive(MergedSubscription, Default)]
pub struct SubscriptionRoot(NewsSubscription);
