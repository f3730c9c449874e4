pub mod login;
pub mod options;
pub mod recruit;
