pub mod identity;
pub mod user;
