pub mod error;
pub mod listing_filter;
pub mod offer_sorter;
pub mod search;
