mod http_remote_fetcher;

pub use http_remote_fetcher::HttpRemoteFetcher;
