// Relationship graphs — ego construction, merging, centrality and node roles.

pub mod centrality;
pub mod ego;
pub mod merge;
pub mod model;
pub mod roles;
