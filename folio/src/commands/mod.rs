pub mod contact;
pub mod database;
pub mod serve;
