/// Channel for messages the user must see (validation, request failures)
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Blocking `window.alert`, matching how the server-rendered pages report errors
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, message: &str) {
        log::info!("notify: {}", message);
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.alert_with_message(message) {
                log::error!("alert failed: {:?}", e);
            }
        }
    }
}
