pub mod endpoints;
pub mod error;
pub mod order;
pub mod orders;

pub use endpoints::{ApiEndpoints, DEFAULT_API_BASE_URL};
pub use error::{OrderError, EMPTY_NAME_MESSAGE, GENERIC_SEARCH_ERROR};
pub use order::*;
pub use orders::{OrderClient, OrderSearch};
