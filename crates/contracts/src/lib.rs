//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-crate data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Worker Model
//! - One worker per output image, identified by a [`WorkerId`] stable for the run
//! - Workers own their [`TextureBuffer`] exclusively; stage routines borrow it
//!   for the duration of one call

mod error;
mod pipeline;
mod progress;
mod stage;
mod texture;
mod worker_id;

pub use error::*;
pub use pipeline::*;
pub use progress::{ProgressSink, ProgressUpdate};
pub use stage::*;
pub use texture::{Rgba, TextureBuffer};
pub use worker_id::WorkerId;
