use async_graphql::MergedObject;

use crate::gql::domains::news::NewsMutation;

#[derive(MergedObject, Default)]
pub struct MutationRoot(NewsMutation);
