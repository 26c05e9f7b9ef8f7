//! Read/write operations for the `spots` table.

mod read;
mod types;
mod write;

pub use read::{count_spots, list_spots_by_bbox, list_spots_by_type_substring};
pub use types::{NewSpot, SpotRow};
pub use write::upsert_spots;
