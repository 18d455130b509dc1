//! Persistence of the signed-in session in `localStorage`.

use common::model::session::Session;
use web_sys::Storage;

const STORAGE_KEY: &str = "casedesk.session";

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// The stored session, if any. A corrupt entry is discarded.
pub fn load() -> Option<Session> {
    let storage = storage()?;
    let raw = storage.get_item(STORAGE_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(err) => {
            gloo_console::warn!(format!("dropping unreadable session: {}", err));
            let _ = storage.remove_item(STORAGE_KEY);
            None
        }
    }
}

pub fn save(session: &Session) {
    if let (Some(storage), Ok(raw)) = (storage(), serde_json::to_string(session)) {
        if storage.set_item(STORAGE_KEY, &raw).is_err() {
            gloo_console::warn!("could not persist session");
        }
    }
}

pub fn clear() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}
