mod asset_source;
mod feed_client;

pub use asset_source::AssetSourcePlugin;
pub use feed_client::{FeedClient, FeedClientFactory};
