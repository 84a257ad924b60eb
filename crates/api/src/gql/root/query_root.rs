use async_graphql::MergedObject;

use crate::gql::domains::news::NewsQuery;

#[derive(MergedObject, Default)]
pub struct QueryRoot(NewsQuery);
