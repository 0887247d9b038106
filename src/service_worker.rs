use log::{debug, info, warn};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::Window;

use crate::dom;
use crate::error::Result;

/// Local development hosts have no worker script to serve.
pub fn is_local_host(hostname: &str) -> bool {
    matches!(hostname, "localhost" | "127.0.0.1")
}

/// Registers the offline worker after the page has loaded. Any failure is
/// logged and otherwise ignored.
pub fn register(window: &Window, script: &str) -> Result<()> {
    let navigator = window.navigator();
    if !dom::has_property(&navigator, "serviceWorker") {
        debug!("service workers not supported");
        return Ok(());
    }
    let hostname = window.location().hostname()?;
    if is_local_host(&hostname) {
        debug!("skipping service worker on {}", hostname);
        return Ok(());
    }

    let script = script.to_string();
    dom::on_load(window, move || {
        let promise = navigator.service_worker().register(&script);
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(registration) => info!("SW registered: {:?}", registration),
                Err(err) => warn!("SW registration failed: {:?}", err),
            }
        });
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_local_hosts() {
        assert!(is_local_host("localhost"));
        assert!(is_local_host("127.0.0.1"));
        assert!(!is_local_host("smithlaw.example"));
        assert!(!is_local_host(""));
    }
}
