pub mod db;
pub mod filterdb;
pub mod listingdb;
