//! Critical ResultRecord Invariants:
//!
//! 1. Records are produced outside the Vault, fully populated
//! 2. The Vault never assigns or rewrites ids or timestamps
//! 3. There is no partial update: replace whole, or delete
//! 4. Source order is preserved exactly

pub mod entity;
pub mod invariants;
pub mod media;

pub use entity::{GroundingSource, ResultRecord};
pub use invariants::validate_record;
pub use media::MediaRef;
