/// Full-page navigation to `path`.
///
/// Unlike router navigation this reloads the application, discarding all
/// in-memory state; the next load hydrates the session from storage.
pub fn redirect(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(path) {
                tracing::error!("Failed to navigate to {}: {:?}", path, e);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("Full-page navigation to {} is only available in the browser", path);
    }
}
