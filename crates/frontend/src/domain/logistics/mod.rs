//! "Arrange transport" dialog: list logistics partners for an order and
//! assign one of them.

pub mod api;
pub mod session;
pub mod ui;

use contracts::domain::common::{OrderId, PartnerId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use self::api::{HttpLogisticsApi, LogisticsApi};
use self::session::{AssignmentOutcome, Generation, ModalSession};
use self::ui::LogisticsModal;
use crate::shared::config::PageConfig;
use crate::shared::dom::{closest_target, element_by_id, listen};
use crate::shared::error::{js_error, FrontendError};
use crate::shared::notify::Notifier;

/// open -> closed (close control, scrim click, Escape)
pub fn close_dialog(session: RwSignal<ModalSession>) {
    if let Some(order_id) = session.try_update(|s| s.close()).flatten() {
        log::debug!("logistics dialog for order {} closed", order_id);
    }
}

/// closed -> open(order_id), then fetch the partner list for it
pub fn open_dialog<A>(session: RwSignal<ModalSession>, api: A, order_id: OrderId)
where
    A: LogisticsApi + 'static,
{
    log::debug!("opening logistics dialog for order {}", order_id);
    let Some(generation) = session.try_update(|s| s.open(order_id)) else {
        return;
    };
    spawn_local(async move {
        load_partners(&api, session, generation).await;
    });
}

pub async fn load_partners<A: LogisticsApi>(
    api: &A,
    session: RwSignal<ModalSession>,
    generation: Generation,
) {
    let result = api.list_partners().await;
    let applied = session
        .try_update(|s| s.partners_loaded(generation, result))
        .unwrap_or(false);
    if !applied {
        log::debug!("partner list arrived after its dialog closed, discarded");
    }
}

/// Run one selection: mark it pending, post it, settle the session.
///
/// Returns `None` when the selection was refused (nothing loaded, unknown
/// partner, or another assignment still in flight).
pub async fn assign_partner<A, N>(
    api: &A,
    notifier: &N,
    session: RwSignal<ModalSession>,
    partner_id: PartnerId,
) -> Option<AssignmentOutcome>
where
    A: LogisticsApi,
    N: Notifier,
{
    let ticket = session
        .try_update(|s| s.begin_assignment(partner_id))
        .flatten()?;
    log::info!(
        "assigning partner {} to order {}",
        ticket.partner_id,
        ticket.order_id
    );

    let result = api.assign_partner(&ticket.order_id, &ticket.partner_id).await;
    let outcome = session.try_update(|s| s.finish_assignment(&ticket, result))?;

    match &outcome {
        AssignmentOutcome::Assigned { message } => {
            if let Some(message) = message {
                notifier.notify(message);
            }
        }
        AssignmentOutcome::Rejected { message } => notifier.notify(message),
        AssignmentOutcome::Stale { assigned } => log::info!(
            "assignment for order {} settled after its dialog closed (assigned: {})",
            ticket.order_id,
            assigned
        ),
    }
    Some(outcome)
}

/// Mount the dialog and route "arrange transport" clicks to it
pub fn attach(document: &Document, config: &PageConfig) -> Result<(), FrontendError> {
    let bindings = &config.bindings;
    let has_triggers = document
        .query_selector(&bindings.arrange_transport_selector)
        .map_err(|e| js_error("querySelector", e))?
        .is_some();
    if !has_triggers {
        return Ok(());
    }

    let host = match element_by_id::<HtmlElement>(document, &bindings.modal_host_id)? {
        Some(host) => host,
        None => {
            let host = document
                .create_element("div")
                .map_err(|e| js_error("createElement", e))?
                .dyn_into::<HtmlElement>()
                .map_err(|_| FrontendError::BrowserApi("created div is not an HtmlElement".to_string()))?;
            host.set_id(&bindings.modal_host_id);
            let body = document
                .body()
                .ok_or_else(|| FrontendError::BrowserApi("document has no body".to_string()))?;
            body.append_child(&host)
                .map_err(|e| js_error("appendChild", e))?;
            host
        }
    };

    let session = RwSignal::new(ModalSession::default());
    let api = HttpLogisticsApi::new(&config.api_base);

    let modal_api = api.clone();
    leptos::mount::mount_to(host, move || view! { <LogisticsModal session=session api=modal_api /> })
        .forget();

    let selector = bindings.arrange_transport_selector.clone();
    let order_attribute = bindings.order_id_attribute.clone();
    listen(document, "click", move |event| {
        let Some(trigger) = closest_target(&event, &selector) else {
            return;
        };
        event.prevent_default();
        let raw = trigger.get_attribute(&order_attribute).unwrap_or_default();
        match OrderId::parse(&raw) {
            Ok(order_id) => open_dialog(session, api.clone(), order_id),
            Err(e) => log::error!("arrange transport control without a usable {}: {}", order_attribute, e),
        }
    })
}
