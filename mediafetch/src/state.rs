use std::sync::Arc;

use media_fetch::MediaFetch;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<MediaFetch>
}

impl AppState {
    pub fn new(client: MediaFetch) -> Self {
        Self {
            client: Arc::new(client)
        }
    }
}
