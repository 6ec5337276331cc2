pub mod constants;
pub mod everest;
pub mod kubernetes;
pub mod prompt;
