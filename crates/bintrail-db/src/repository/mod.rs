pub mod catalog;
pub mod releases;

pub use catalog::CatalogRepository;
pub use releases::ReleaseRepository;
