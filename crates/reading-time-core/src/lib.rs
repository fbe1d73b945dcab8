//! Reading-progress estimation engine.
//!
//! Given a tree of text fragments and their vertical extents, the engine maps
//! the visitor's scroll position to a "read line", counts the words left
//! below it, learns the visitor's reading speed from how fast that count
//! drops, and turns the result into a label such as `"5m, 40s left"`.
//!
//! Everything touching a real page (measuring text, drawing the indicator,
//! storing the learned speed) sits behind the traits in [`host`], [`indicator`]
//! and [`store`]. [`tracker::ReadingTracker`] wires the pieces together for one
//! tracked element.

pub mod cancellation;
pub mod config;
pub mod content;
pub mod device;
pub mod host;
pub mod indicator;
pub mod progress;
pub mod projector;
pub mod read_line;
pub mod schedule;
pub mod speed;
pub mod store;
pub mod throttle;
pub mod tracker;
pub mod viewport;

pub use config::TrackerConfig;
pub use content::{ContentNode, FragmentId, TextFragment, TextUnit};
pub use host::{Extent, GeometryProvider, PageHost, PageMetrics};
pub use indicator::Indicator;
pub use read_line::{ReadProgress, Visibility};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use tracker::ReadingTracker;
pub use viewport::ViewportBounds;
