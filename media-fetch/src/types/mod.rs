mod request;
mod selector;

pub use request::{AudioRequest, VideoRequest};
pub use selector::FormatSelector;
