pub mod decimal;
pub mod rooms;
