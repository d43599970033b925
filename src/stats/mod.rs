//! Statistical core: the analyzers every keyset generator's output
//! ultimately feeds into.

pub mod avalanche;
pub mod bic;
pub mod birthday;
pub mod bucket;
pub mod collision;
pub mod diffdist;

pub use avalanche::{AvalancheResult, FlipMatrix};
pub use bic::{BicResult, JointTally};
pub use bucket::BucketTestResult;
pub use collision::CollisionResult;
