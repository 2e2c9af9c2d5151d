pub mod joins;
pub mod operators;

pub use self::joins::{JoinConfig, JoinOn, OnClause, TargetRef};
pub use self::operators::{JoinSigil, LikeMarkers, RelationType, Wildcard};
