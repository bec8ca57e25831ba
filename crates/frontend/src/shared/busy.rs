//! Busy state for trigger controls that start a request.

use web_sys::HtmlButtonElement;

/// A control that can be disabled and relabeled while its request runs
pub trait TriggerControl {
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn set_enabled(&self, enabled: bool);
}

impl TriggerControl for HtmlButtonElement {
    fn label(&self) -> String {
        self.text_content().unwrap_or_default()
    }

    fn set_label(&self, label: &str) {
        self.set_text_content(Some(label));
    }

    fn set_enabled(&self, enabled: bool) {
        self.set_disabled(!enabled);
    }
}

/// Disables a control and shows a busy label until dropped.
///
/// The original label and enabled state come back in `Drop`, so every exit
/// from the request (success, handled error, early return, unwinding)
/// leaves the control usable again.
pub struct BusyGuard<'a, C: TriggerControl + ?Sized> {
    control: &'a C,
    original_label: String,
}

impl<'a, C: TriggerControl + ?Sized> BusyGuard<'a, C> {
    pub fn engage(control: &'a C, busy_label: &str) -> Self {
        let original_label = control.label();
        control.set_enabled(false);
        control.set_label(busy_label);
        Self {
            control,
            original_label,
        }
    }
}

impl<C: TriggerControl + ?Sized> Drop for BusyGuard<'_, C> {
    fn drop(&mut self) {
        self.control.set_label(&self.original_label);
        self.control.set_enabled(true);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::TriggerControl;
    use std::cell::RefCell;

    /// In-memory button recording every state it passed through
    #[derive(Debug)]
    pub struct FakeButton {
        pub label: RefCell<String>,
        pub enabled: RefCell<bool>,
        pub history: RefCell<Vec<(String, bool)>>,
    }

    impl FakeButton {
        pub fn new(label: &str) -> Self {
            Self {
                label: RefCell::new(label.to_string()),
                enabled: RefCell::new(true),
                history: RefCell::new(Vec::new()),
            }
        }

        fn record(&self) {
            self.history
                .borrow_mut()
                .push((self.label.borrow().clone(), *self.enabled.borrow()));
        }
    }

    impl TriggerControl for FakeButton {
        fn label(&self) -> String {
            self.label.borrow().clone()
        }

        fn set_label(&self, label: &str) {
            *self.label.borrow_mut() = label.to_string();
            self.record();
        }

        fn set_enabled(&self, enabled: bool) {
            *self.enabled.borrow_mut() = enabled;
            self.record();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeButton;
    use super::*;

    #[test]
    fn test_guard_sets_busy_state() {
        let button = FakeButton::new("Suggest Price");
        let guard = BusyGuard::engage(&button, "Suggesting...");
        assert_eq!(button.label(), "Suggesting...");
        assert!(!*button.enabled.borrow());
        drop(guard);
        assert_eq!(button.label(), "Suggest Price");
        assert!(*button.enabled.borrow());
    }

    #[test]
    fn test_guard_restores_on_unwind() {
        let button = FakeButton::new("Suggest Price");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = BusyGuard::engage(&button, "Suggesting...");
            panic!("handler blew up");
        }));
        assert!(result.is_err());
        assert_eq!(button.label(), "Suggest Price");
        assert!(*button.enabled.borrow());
    }
}
