//! Boundary layer for the carlot inventory.
//!
//! Sources feed records in, sinks take admin writes out, and the
//! [`InventoryController`] owns the collection in between.
//!
//! - [`LiveSource`]: pushes full snapshots on every change
//! - [`SheetSource`]: one-shot CSV export, from a file or a URL
//! - [`AdminSink`]: persists create/edit/delete
//!
//! [`MemoryStore`] and [`JsonFileStore`] implement both the live source and
//! the sink side.

pub mod controller;
pub mod error;
pub mod fetch;
pub mod sheet;
pub mod source;
pub mod store;

pub use controller::{InventoryController, EMPTY_SOURCE_ADVISORY};
pub use error::{SinkAction, SyncError};
pub use fetch::{BackoffStrategy, FetchPolicy, RetryPolicy, TimeoutConfig};
pub use sheet::{parse_sheet, FileSheetSource, HttpSheetSource};
pub use source::{AdminSink, LiveSource, RawDocument, SheetSource, SnapshotStream};
pub use store::{JsonFileStore, MemoryStore};
