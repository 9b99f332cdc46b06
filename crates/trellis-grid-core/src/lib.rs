//! Core systems for Trellis Grid.
//!
//! This crate provides the foundational observer primitive used throughout
//! the Trellis Grid engine:
//!
//! - **Signal/Slot System**: Type-safe change notification between the shared
//!   interaction stores (hover, expansion) and the row instances observing them
//!
//! The grid engine is synchronous and single-threaded per render pass, so
//! slots are always invoked directly on the emitting thread. Signals are still
//! `Send + Sync` so a store can be shared across windows or worker threads
//! that each run their own passes.
//!
//! # Signal/Slot Example
//!
//! ```
//! use trellis_grid_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Logging
//!
//! Trellis Grid uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; applications that want to see engine logs
//! install their own:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```

mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
