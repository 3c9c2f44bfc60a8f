//! Client for the backend stores bintrail consumes: the notification
//! payload queue and the patch-info document source.

pub mod client;
pub mod error;
pub mod patchinfo;
pub mod payload;

pub use client::BackendClient;
pub use error::{BackendError, Result};
pub use patchinfo::Patchinfo;
pub use payload::BinaryDescriptor;
