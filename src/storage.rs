use torch_core::{UsageStore, USAGE_KEY};
use web_sys as web;

/// `localStorage`-backed usage flag. Private browsing and disabled storage
/// degrade to "never used" without surfacing an error.
pub struct LocalUsageStore;

impl LocalUsageStore {
    fn storage() -> Option<web::Storage> {
        match web::window().map(|w| w.local_storage()) {
            Some(Ok(Some(s))) => Some(s),
            Some(Err(e)) => {
                log::debug!("[storage] localStorage unavailable: {:?}", e);
                None
            }
            _ => None,
        }
    }
}

impl UsageStore for LocalUsageStore {
    fn has_used(&self) -> bool {
        Self::storage()
            .and_then(|s| s.get_item(USAGE_KEY).ok().flatten())
            .is_some_and(|v| v == "1")
    }

    fn mark_used(&self) {
        if let Some(s) = Self::storage() {
            if let Err(e) = s.set_item(USAGE_KEY, "1") {
                log::debug!("[storage] could not persist usage flag: {:?}", e);
            }
        }
    }
}
