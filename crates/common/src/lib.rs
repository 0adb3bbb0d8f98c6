pub mod config;

#[cfg(feature = "email")]
pub mod email;

#[cfg(feature = "logging")]
pub mod logging;

#[cfg(feature = "s3")]
pub mod s3;
