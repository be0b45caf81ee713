pub mod traits;
pub mod reqwest_fetcher;

pub use traits::{FetchError, FetchResponse, HttpFetcher};
pub use reqwest_fetcher::ReqwestFetcher;

#[cfg(test)]
pub use traits::MockHttpFetcher;
