pub mod gateway;
pub mod guards;
