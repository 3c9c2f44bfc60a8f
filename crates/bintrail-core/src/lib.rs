use error::Error;

pub mod cache;
pub mod enrich;
pub mod error;
pub mod identity;
pub mod ingest;
pub mod projection;
pub mod reconcile;
pub mod timestamp;

pub type BintrailResult<T> = std::result::Result<T, Error>;
