pub mod omdb;
pub mod proxy;
pub mod source;
pub mod types;

#[cfg(test)]
pub mod fake;

pub use omdb::OmdbClient;
pub use proxy::ProxyClient;
pub use source::*;
pub use types::*;
