// Adapters layer: concrete implementations of the domain ports (http, storage, clipboard).

pub mod clipboard;
pub mod http;
pub mod storage;

pub use clipboard::SystemClipboard;
pub use http::HttpSearchApi;
pub use storage::LocalStorage;
