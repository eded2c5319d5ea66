// Service exports
pub mod cache;
pub mod repository;

pub use cache::{CacheError, CacheKey, SearchCache};
pub use repository::{seed_listings, ListingRepository, RepositoryError};
