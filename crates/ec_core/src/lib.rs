pub mod api;
pub mod error;
pub mod messages;
pub mod types;

pub use api::ExposureApi;
pub use error::{Error, ErrorKind};
pub use types::{ExposureCheckResponse, SearchRequest, SearchResultItem};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use super::api::ExposureApi;
    pub use super::types::{ExposureCheckResponse, SearchRequest, SearchResultItem};
    pub use super::{Error, ErrorKind, Result};
}
