pub mod driver;
pub mod pid;
