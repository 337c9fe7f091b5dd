#![allow(clippy::must_use_candidate)]

mod error;

pub use error::{ErrorBody, ErrorDetail, HttpError};
