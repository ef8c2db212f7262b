//! Field path resolution over nested records.
//!
//! A record is any `serde_json::Value` tree. Paths are dot-separated
//! segments, each a name optionally followed by a bracketed index:
//!
//! ```text
//! stats[strength]         mapping key
//! inventory[0].weight     sequence position
//! skills[stealth].rank    mapping key, then a field of that entry
//! inventory.weight        fan-out over every inventory entry
//! skills.rank             fan-out over every value of `skills`
//! ```
//!
//! A segment without an index that lands on a sequence or mapping applies
//! the rest of the path to every element (for a mapping, every value). So
//! `stats.strength` does not read the `strength` key of `stats`; it looks
//! for a `strength` field inside each value of `stats`. Use `stats[strength]`
//! for a keyed lookup.

pub mod error;
pub mod path;
pub mod resolve;

pub use error::{PathError, Result};
pub use path::{FieldPath, Segment};
pub use resolve::{flatten, get_field, has_field, Resolved};
