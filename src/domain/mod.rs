pub mod account;
pub mod aggregate;
pub mod builder;
pub mod criteria;
pub mod filter;
pub mod listing;
pub mod matching;
pub mod session;
pub mod sort;

pub use aggregate::aggregate;
pub use criteria::SearchCriteria;
pub use filter::filter_listings;
pub use sort::{sort_listings, SortKey};
