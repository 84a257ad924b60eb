// Each domain contains: mod.rs, resolvers.rs, types.rs

pub mod news;
