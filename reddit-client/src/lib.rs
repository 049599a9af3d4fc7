pub mod api;
pub mod auth;
pub mod retry;

pub use api::{
    Listing, ListingChild, ListingData, RawCommentData, RawPostData, RedditApiClient,
};
pub use auth::AppToken;
pub use retry::{RetryConfig, RetryStrategy};
