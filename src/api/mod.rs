pub mod client;
pub mod traits;

pub use client::LbcClient;
pub use traits::ListingProvider;
