//! Page configuration: which variant is running and which markup it binds to.
//!
//! Default bindings per variant are embedded TOML documents; the `<body>`
//! element's `data-*` attributes override the variant, API base, speech
//! locale and log level.

use contracts::usecases::predict_price::PredictPriceRoute;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use web_sys::HtmlElement;

/// Which server-rendered page the scripts run on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageVariant {
    /// Buyer-facing listing pages (farmer dashboard, add-crop form, transactions)
    #[default]
    Buyer,
    /// Company marketplace dashboard
    Company,
}

impl FromStr for PageVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buyer" => Ok(PageVariant::Buyer),
            "company" => Ok(PageVariant::Company),
            other => Err(format!("unknown page variant '{}'", other)),
        }
    }
}

impl fmt::Display for PageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageVariant::Buyer => f.write_str("buyer"),
            PageVariant::Company => f.write_str("company"),
        }
    }
}

/// Element ids, selectors and attributes the scripts rely on
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageBindings {
    pub search_input_id: String,
    pub card_selector: String,
    pub card_name_attribute: String,
    pub card_name_selector: String,

    pub voice_button_id: String,
    pub listening_class: String,

    pub price_trigger_id: String,
    pub crop_name_id: String,
    pub price_field_id: String,
    #[serde(default)]
    pub price_route: PredictPriceRoute,

    pub arrange_transport_selector: String,
    pub order_id_attribute: String,
    pub modal_host_id: String,
}

/// Default bindings for the buyer-facing pages
const BUYER_BINDINGS: &str = r#"
search_input_id = "searchInput"
card_selector = ".crop-card"
card_name_attribute = "data-name"
card_name_selector = ".card-title"

voice_button_id = "voiceSearchBtn"
listening_class = "listening"

price_trigger_id = "suggestPriceBtn"
crop_name_id = "name"
price_field_id = "price"
price_route = "query"

arrange_transport_selector = ".arrange-logistics-btn"
order_id_attribute = "data-order-id"
modal_host_id = "logisticsModalRoot"
"#;

/// Default bindings for the company dashboard
const COMPANY_BINDINGS: &str = r#"
search_input_id = "marketSearch"
card_selector = ".market-card"
card_name_attribute = "data-crop-name"
card_name_selector = ".card-title"

voice_button_id = "voiceSearchBtn"
listening_class = "listening"

price_trigger_id = "suggestPriceBtn"
crop_name_id = "cropName"
price_field_id = "priceInput"
price_route = "query"

arrange_transport_selector = "[data-order-id].arrange-transport"
order_id_attribute = "data-order-id"
modal_host_id = "logisticsModalRoot"
"#;

impl PageBindings {
    pub fn for_variant(variant: PageVariant) -> Result<Self, toml::de::Error> {
        let source = match variant {
            PageVariant::Buyer => BUYER_BINDINGS,
            PageVariant::Company => COMPANY_BINDINGS,
        };
        toml::from_str(source)
    }
}

pub const DEFAULT_SPEECH_LOCALE: &str = "en-US";

#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub variant: PageVariant,
    pub bindings: PageBindings,
    /// Empty means "same origin as the page"
    pub api_base: String,
    pub speech_locale: String,
    pub log_level: log::Level,
}

fn default_log_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}

impl PageConfig {
    /// Build the configuration from `data-*` style lookups (`page`,
    /// `api-base`, `speech-locale`, `log-level`).
    ///
    /// Bad values never abort: they are logged and the defaults are used.
    pub fn from_attributes<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let variant = match lookup("page") {
            None => PageVariant::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                log::warn!("{}, falling back to buyer bindings", e);
                PageVariant::Buyer
            }),
        };

        let bindings = match PageBindings::for_variant(variant) {
            Ok(bindings) => bindings,
            Err(e) => {
                log::error!("embedded {} bindings are invalid: {}", variant, e);
                fallback_bindings()
            }
        };

        let log_level = lookup("log-level")
            .and_then(|raw| match log::Level::from_str(raw.trim()) {
                Ok(level) => Some(level),
                Err(_) => {
                    log::warn!("ignoring unknown log level '{}'", raw);
                    None
                }
            })
            .unwrap_or_else(default_log_level);

        Self {
            variant,
            bindings,
            api_base: lookup("api-base").unwrap_or_default().trim().to_string(),
            speech_locale: lookup("speech-locale")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SPEECH_LOCALE.to_string()),
            log_level,
        }
    }

    /// Read the configuration from the `<body>` element's dataset
    pub fn from_body(body: &HtmlElement) -> Self {
        let dataset = body.dataset();
        Self::from_attributes(|key| dataset.get(&dataset_key(key)))
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::from_attributes(|_| None)
    }
}

/// `api-base` -> `apiBase`, the DOMStringMap spelling of a `data-*` name
fn dataset_key(attribute: &str) -> String {
    let mut key = String::with_capacity(attribute.len());
    let mut upper_next = false;
    for c in attribute.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            key.extend(c.to_uppercase());
            upper_next = false;
        } else {
            key.push(c);
        }
    }
    key
}

/// Same values as `BUYER_BINDINGS`, used only if the embedded TOML fails to parse
fn fallback_bindings() -> PageBindings {
    PageBindings {
        search_input_id: "searchInput".to_string(),
        card_selector: ".crop-card".to_string(),
        card_name_attribute: "data-name".to_string(),
        card_name_selector: ".card-title".to_string(),
        voice_button_id: "voiceSearchBtn".to_string(),
        listening_class: "listening".to_string(),
        price_trigger_id: "suggestPriceBtn".to_string(),
        crop_name_id: "name".to_string(),
        price_field_id: "price".to_string(),
        price_route: PredictPriceRoute::Query,
        arrange_transport_selector: ".arrange-logistics-btn".to_string(),
        order_id_attribute: "data-order-id".to_string(),
        modal_host_id: "logisticsModalRoot".to_string(),
    }
}
