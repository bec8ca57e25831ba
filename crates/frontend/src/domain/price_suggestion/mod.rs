//! On-demand price suggestion for the crop listing form.

pub mod api;

use std::rc::Rc;

use leptos::task::spawn_local;
use web_sys::{Document, HtmlButtonElement, HtmlInputElement};

use self::api::{HttpPricePredictor, PricePredictor};
use crate::shared::busy::{BusyGuard, TriggerControl};
use crate::shared::config::PageConfig;
use crate::shared::dom::{element_by_id, listen};
use crate::shared::error::FrontendError;
use crate::shared::notify::{AlertNotifier, Notifier};

pub const MISSING_CROP_MESSAGE: &str = "Please enter a crop name first.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Could not fetch a price suggestion. Please try again.";
pub const BUSY_LABEL: &str = "Suggesting...";

/// Form fields the suggestion reads from and writes to
pub trait PriceForm {
    fn crop_name(&self) -> String;
    fn set_suggested_price(&self, price: f64);
}

/// Crop-name and price inputs of the listing form
pub struct DomPriceForm {
    crop_name: HtmlInputElement,
    price: HtmlInputElement,
}

impl PriceForm for DomPriceForm {
    fn crop_name(&self) -> String {
        self.crop_name.value()
    }

    fn set_suggested_price(&self, price: f64) {
        self.price.set_value(&format_price(price));
    }
}

pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

pub struct PriceSuggestion<P, F, T, N> {
    pub predictor: P,
    pub form: F,
    pub trigger: T,
    pub notifier: N,
}

impl<P, F, T, N> PriceSuggestion<P, F, T, N>
where
    P: PricePredictor,
    F: PriceForm,
    T: TriggerControl,
    N: Notifier,
{
    /// Validate, request, fill the price field.
    ///
    /// The trigger stays disabled with a busy label only while the request
    /// is outstanding; the guard hands it back on every exit.
    pub async fn run(&self) -> Result<f64, FrontendError> {
        let crop_name = self.form.crop_name().trim().to_string();
        if crop_name.is_empty() {
            let err = FrontendError::Validation(MISSING_CROP_MESSAGE.to_string());
            self.notifier.notify(&err.user_message(GENERIC_FAILURE_MESSAGE));
            return Err(err);
        }

        let _busy = BusyGuard::engage(&self.trigger, BUSY_LABEL);
        match self.predictor.predict_price(&crop_name).await {
            Ok(price) => {
                log::info!("suggested price for {}: {}", crop_name, price);
                self.form.set_suggested_price(price);
                Ok(price)
            }
            Err(err) => {
                log::warn!("price suggestion for {} failed: {}", crop_name, err);
                self.notifier.notify(&err.user_message(GENERIC_FAILURE_MESSAGE));
                Err(err)
            }
        }
    }
}

/// Wire the suggestion trigger when the page has the listing form
pub fn attach(document: &Document, config: &PageConfig) -> Result<(), FrontendError> {
    let bindings = &config.bindings;
    let Some(trigger) = element_by_id::<HtmlButtonElement>(document, &bindings.price_trigger_id)? else {
        return Ok(());
    };
    let (Some(crop_name), Some(price)) = (
        element_by_id::<HtmlInputElement>(document, &bindings.crop_name_id)?,
        element_by_id::<HtmlInputElement>(document, &bindings.price_field_id)?,
    ) else {
        log::warn!(
            "#{} present without #{} / #{}, price suggestion disabled",
            bindings.price_trigger_id,
            bindings.crop_name_id,
            bindings.price_field_id
        );
        return Ok(());
    };

    let suggestion = Rc::new(PriceSuggestion {
        predictor: HttpPricePredictor::new(&config.api_base, bindings.price_route),
        form: DomPriceForm { crop_name, price },
        trigger: trigger.clone(),
        notifier: AlertNotifier,
    });

    listen(&trigger, "click", move |event| {
        event.prevent_default();
        let suggestion = Rc::clone(&suggestion);
        spawn_local(async move {
            let _ = suggestion.run().await;
        });
    })
}
