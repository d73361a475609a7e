pub mod device;
pub mod login;
