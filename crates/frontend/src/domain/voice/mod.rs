//! Speech-to-text shortcut for the search field.
//!
//! The browser's speech recognition is resolved once at start-up; pages
//! running in browsers without it never show the microphone control.

use std::cell::Cell;
use std::rc::Rc;

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

use super::search::SearchFilter;
use crate::shared::config::PageConfig;
use crate::shared::dom::{element_by_id, listen, set_shown};
use crate::shared::error::{js_error, FrontendError};

const CONSTRUCTOR_NAMES: [&str; 2] = ["SpeechRecognition", "webkitSpeechRecognition"];

/// Speech recognition support, decided once per page load
#[derive(Clone)]
pub enum SpeechCapability {
    Supported(Function),
    Unsupported,
}

impl SpeechCapability {
    pub fn detect(window: &Window) -> Self {
        CONSTRUCTOR_NAMES
            .iter()
            .filter_map(|name| Reflect::get(window, &JsValue::from_str(name)).ok())
            .find_map(|value| value.dyn_into::<Function>().ok())
            .map(SpeechCapability::Supported)
            .unwrap_or(SpeechCapability::Unsupported)
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, SpeechCapability::Supported(_))
    }
}

/// Whether the microphone control is usable on this page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceWiring {
    Wire,
    Hide(HideReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideReason {
    /// Browser has no speech recognition
    Unsupported,
    /// Nothing to put the transcript into
    NoSearchField,
}

pub fn voice_wiring(supported: bool, has_search: bool) -> VoiceWiring {
    match (supported, has_search) {
        (false, _) => VoiceWiring::Hide(HideReason::Unsupported),
        (true, false) => VoiceWiring::Hide(HideReason::NoSearchField),
        (true, true) => VoiceWiring::Wire,
    }
}

/// Listening state of the voice control; one capture at a time
#[derive(Debug, Default)]
pub struct VoiceSession {
    listening: Cell<bool>,
}

impl VoiceSession {
    /// Claim the recognizer; `false` while a capture is already running
    pub fn begin(&self) -> bool {
        !self.listening.replace(true)
    }

    pub fn finish(&self) {
        self.listening.set(false);
    }

    pub fn is_listening(&self) -> bool {
        self.listening.get()
    }
}

/// Trimmed transcript, or `None` when recognition produced only whitespace
pub fn transcript_to_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn set_prop(target: &JsValue, key: &str, value: &JsValue) -> Result<(), FrontendError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| js_error(&format!("SpeechRecognition.{}", key), e))
}

/// `event.results[0][0].transcript`
fn first_transcript(event: &JsValue) -> Option<String> {
    let results = Reflect::get(event, &JsValue::from_str("results")).ok()?;
    let result = Reflect::get_u32(&results, 0).ok()?;
    let alternative = Reflect::get_u32(&result, 0).ok()?;
    Reflect::get(&alternative, &JsValue::from_str("transcript"))
        .ok()?
        .as_string()
}

/// Construct, configure and start one non-continuous recognizer
fn start_recognition<T, D>(
    constructor: &Function,
    locale: &str,
    mut on_transcript: T,
    on_done: D,
) -> Result<(), FrontendError>
where
    T: FnMut(String) + 'static,
    D: Fn() + Clone + 'static,
{
    let recognition = Reflect::construct(constructor, &Array::new())
        .map_err(|e| js_error("new SpeechRecognition()", e))?;

    set_prop(&recognition, "lang", &JsValue::from_str(locale))?;
    set_prop(&recognition, "continuous", &JsValue::FALSE)?;
    set_prop(&recognition, "interimResults", &JsValue::FALSE)?;
    set_prop(&recognition, "maxAlternatives", &JsValue::from_f64(1.0))?;

    let onresult = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        match first_transcript(&event).as_deref().and_then(transcript_to_query) {
            Some(query) => on_transcript(query),
            None => log::debug!("speech recognition returned no transcript"),
        }
    });

    let done = on_done.clone();
    let onend = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| done());

    let done = on_done.clone();
    let onerror = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        let code = Reflect::get(&event, &JsValue::from_str("error"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| "unknown".to_string());
        log::warn!("speech recognition error: {}", code);
        done();
    });

    set_prop(&recognition, "onresult", onresult.as_ref())?;
    set_prop(&recognition, "onend", onend.as_ref())?;
    set_prop(&recognition, "onerror", onerror.as_ref())?;
    // The recognizer owns these callbacks until it is garbage collected
    onresult.forget();
    onend.forget();
    onerror.forget();

    let start = Reflect::get(&recognition, &JsValue::from_str("start"))
        .map_err(|e| js_error("SpeechRecognition.start", e))?
        .dyn_into::<Function>()
        .map_err(|e| js_error("SpeechRecognition.start", e))?;
    start
        .call0(&recognition)
        .map_err(|e| js_error("SpeechRecognition.start()", e))?;
    Ok(())
}

/// Wire the microphone control, or hide it when recognition is unavailable
pub fn attach(
    window: &Window,
    document: &Document,
    config: &PageConfig,
    search: Option<Rc<SearchFilter>>,
) -> Result<(), FrontendError> {
    let bindings = &config.bindings;
    let Some(button) = element_by_id::<HtmlElement>(document, &bindings.voice_button_id)? else {
        return Ok(());
    };

    let capability = SpeechCapability::detect(window);
    match voice_wiring(capability.is_supported(), search.is_some()) {
        VoiceWiring::Wire => {}
        VoiceWiring::Hide(HideReason::Unsupported) => {
            log::info!(
                "{}, hiding #{}",
                FrontendError::CapabilityUnavailable {
                    feature: "speech recognition"
                },
                bindings.voice_button_id
            );
            set_shown(&button, false);
            return Ok(());
        }
        VoiceWiring::Hide(HideReason::NoSearchField) => {
            log::debug!("voice control present without a search field, hiding it");
            set_shown(&button, false);
            return Ok(());
        }
    }
    let (SpeechCapability::Supported(constructor), Some(search)) = (capability, search) else {
        return Ok(());
    };

    let session = Rc::new(VoiceSession::default());
    let locale = config.speech_locale.clone();
    let listening_class = bindings.listening_class.clone();
    let control = button.clone();

    listen(&button, "click", move |event| {
        event.prevent_default();
        if !session.begin() {
            log::debug!("voice search already listening");
            return;
        }

        if let Err(e) = control.class_list().add_1(&listening_class) {
            log::error!("failed to mark voice control as listening: {:?}", e);
        }

        let on_done = {
            let session = Rc::clone(&session);
            let control = control.clone();
            let listening_class = listening_class.clone();
            move || {
                session.finish();
                if let Err(e) = control.class_list().remove_1(&listening_class) {
                    log::error!("failed to clear listening indicator: {:?}", e);
                }
            }
        };

        let search = Rc::clone(&search);
        let started = start_recognition(
            &constructor,
            &locale,
            move |query| {
                let visible = search.set_query(&query);
                log::info!("voice search '{}' matched {} cards", query, visible);
            },
            on_done.clone(),
        );

        if let Err(e) = started {
            log::error!("voice search disabled: {}", e);
            on_done();
            set_shown(&control, false);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_allows_one_capture() {
        let session = VoiceSession::default();
        assert!(session.begin());
        assert!(session.is_listening());
        assert!(!session.begin());
        session.finish();
        assert!(!session.is_listening());
        assert!(session.begin());
    }

    #[test]
    fn test_unsupported_browser_hides_control() {
        assert_eq!(
            voice_wiring(false, true),
            VoiceWiring::Hide(HideReason::Unsupported)
        );
        assert_eq!(
            voice_wiring(false, false),
            VoiceWiring::Hide(HideReason::Unsupported)
        );
    }

    #[test]
    fn test_missing_search_field_hides_control() {
        assert_eq!(
            voice_wiring(true, false),
            VoiceWiring::Hide(HideReason::NoSearchField)
        );
    }

    #[test]
    fn test_supported_with_search_is_wired() {
        assert_eq!(voice_wiring(true, true), VoiceWiring::Wire);
        assert!(!SpeechCapability::Unsupported.is_supported());
    }

    #[test]
    fn test_transcript_to_query() {
        assert_eq!(transcript_to_query("  basmati rice "), Some("basmati rice".to_string()));
        assert_eq!(transcript_to_query("   "), None);
        assert_eq!(transcript_to_query(""), None);
    }
}
