pub mod filtermodel;
pub mod listingmodel;
