pub mod filter;
pub mod page;
pub mod row;
pub mod session;
