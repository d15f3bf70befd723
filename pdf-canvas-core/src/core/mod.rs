pub mod error;

pub use error::{DrawError, DrawResult};
