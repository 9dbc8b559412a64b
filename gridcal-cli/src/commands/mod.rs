pub mod add;
pub mod day;
pub mod login;
pub mod month;
pub mod show;
