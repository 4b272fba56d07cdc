use std::sync::OnceLock;

use mac_oui::Oui;
use pnet::util::MacAddr;
use tracing::debug;

static OUI_DB: OnceLock<Option<Oui>> = OnceLock::new();

/// Retrieves or initializes the **Organizationally unique identifier** database.
///
/// Used to point the operator at the manufacturer of a responding server.
fn get_oui_db() -> Option<&'static Oui> {
    OUI_DB
        .get_or_init(|| match Oui::default() {
            Ok(db) => Some(db),
            Err(e) => {
                debug!("OUI database unavailable: {e}");
                None
            }
        })
        .as_ref()
}

/// Identify the vendor of a MAC address.
pub fn get_vendor(mac: MacAddr) -> Option<String> {
    let db = get_oui_db()?;
    match db.lookup_by_mac(&mac.to_string()) {
        Ok(Some(entry)) => Some(entry.company_name.clone()),
        _ => None,
    }
}

/// Locally administered addresses are set by software, never burned in by a vendor.
pub fn is_locally_administered(mac: MacAddr) -> bool {
    mac.0 & 0b0000_0010 != 0
}
