pub mod observer;
pub mod source;

pub use observer::RebindEventObserver;
pub use source::RebindEventSource;
