mod fake_feed;

pub use fake_feed::{FakeFeed, FakeFeedFactory, FeedCall};
