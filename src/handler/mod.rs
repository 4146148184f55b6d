pub mod filters;
pub mod locations;
