//! Types and traits for recording values emitted while interacting with environments.
//!
//! * [`Record`] - A container of key-value pairs of various data types
//! * [`RecordValue`] - The values that can be stored in a [`Record`]
//! * [`Recorder`] - A destination of records
//! * [`BufferedRecorder`] - A recorder that keeps records in memory
//!
//! # Basic Usage
//!
//! ```rust
//! use amusepark_core::record::{Record, RecordValue};
//!
//! let mut record = Record::from_scalar("reward", 0.0);
//! record.insert("step", RecordValue::Scalar(3.0));
//! record.insert("arrow", RecordValue::String("0".to_string()));
//!
//! assert_eq!(record.get_scalar("step").unwrap(), 3.0);
//! ```
mod base;
mod buffered_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use recorder::Recorder;
