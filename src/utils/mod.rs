pub mod email;
pub mod logging;
