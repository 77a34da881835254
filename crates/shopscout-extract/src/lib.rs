pub mod error;
pub mod fetch;
pub mod heuristic;
pub mod hydrate;
pub mod merge;
pub mod robots;
pub mod skip;
pub mod structured;
pub mod url_shape;

pub use error::ExtractError;
pub use hydrate::{HydrationBatch, Hydrator};
pub use merge::ExtractedRecord;
pub use skip::SkipReason;
