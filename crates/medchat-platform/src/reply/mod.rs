pub mod http;

pub use http::HttpReplyClient;
