pub mod deploy;
pub mod failure;
pub mod teardown;
