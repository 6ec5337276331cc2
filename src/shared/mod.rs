pub mod error;

pub use error::{EverestError, Result};
