//! Offline Mirror
//!
//! The full item list is mirrored into localStorage after every change and
//! read back on start, before the network fetch.

use crate::models::Item;

pub const STORAGE_KEY: &str = "shoppinglist-items";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn encode(items: &[Item]) -> Result<String, String> {
    serde_json::to_string(items).map_err(|e| e.to_string())
}

/// Parse a mirrored list. Unparseable data counts as no mirror.
pub fn decode(raw: &str) -> Result<Vec<Item>, String> {
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

/// Write the mirror; failures are logged and otherwise ignored
pub fn save(items: &[Item]) {
    let Some(storage) = storage() else { return };
    match encode(items) {
        Ok(raw) => {
            if let Err(e) = storage.set_item(STORAGE_KEY, &raw) {
                web_sys::console::error_1(&format!("[OFFLINE] Failed to save: {:?}", e).into());
            }
        }
        Err(e) => web_sys::console::error_1(&format!("[OFFLINE] Failed to encode: {}", e).into()),
    }
}

pub fn load() -> Option<Vec<Item>> {
    let raw = storage()?.get_item(STORAGE_KEY).ok().flatten()?;
    match decode(&raw) {
        Ok(items) => {
            web_sys::console::log_1(&format!("[OFFLINE] Loaded {} mirrored items", items.len()).into());
            Some(items)
        }
        Err(e) => {
            web_sys::console::error_1(&format!("[OFFLINE] Ignoring unreadable mirror: {}", e).into());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_keeps_every_field() {
        let mut milk = Item::draft("Melk".to_string(), None, 3);
        milk.is_completed = true;
        let raw = encode(std::slice::from_ref(&milk)).unwrap();

        // Same wire format as the API
        assert!(raw.contains("\"isCompleted\":true"));
        assert_eq!(decode(&raw).unwrap(), vec![milk]);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(decode("{not json").is_err());
        assert!(decode("[]").unwrap().is_empty());
    }
}
