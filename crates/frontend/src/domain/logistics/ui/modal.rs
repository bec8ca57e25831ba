use contracts::domain::common::PartnerId;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::logistics::api::HttpLogisticsApi;
use crate::domain::logistics::session::{ListingView, ModalSession, PartnerEntry, NO_PARTNERS_MESSAGE};
use crate::domain::logistics::{assign_partner, close_dialog};
use crate::shared::dom::reload_page;
use crate::shared::modal::Modal;
use crate::shared::notify::AlertNotifier;

pub const MODAL_ID: &str = "logisticsModal";
pub const PARTNER_LIST_ID: &str = "partnerList";

/// Dialog for picking a logistics partner for the session's order.
///
/// Renders nothing while the session is closed.
#[component]
pub fn LogisticsModal(session: RwSignal<ModalSession>, api: HttpLogisticsApi) -> impl IntoView {
    let api = StoredValue::new(api);

    let on_close = Callback::new(move |_: ()| close_dialog(session));

    let on_select = Callback::new(move |partner_id: PartnerId| {
        let api = api.get_value();
        spawn_local(async move {
            let outcome = assign_partner(&api, &AlertNotifier, session, partner_id).await;
            let modal_open = session.with_untracked(|s| s.is_open());
            if outcome.is_some_and(|o| o.reloads_page(modal_open)) {
                reload_page();
            }
        });
    });

    let title = Signal::derive(move || {
        session.with(|s| {
            s.order_id()
                .map(|id| format!("Arrange Transport for Order #{}", id))
                .unwrap_or_default()
        })
    });

    view! {
        <Show when=move || session.with(|s| s.is_open())>
            <Modal id=MODAL_ID title=title on_close=on_close>
                <div id=PARTNER_LIST_ID class="partner-list">
                    {move || {
                        session
                            .with(|s| s.listing_view())
                            .map(|listing| partner_listing(listing, on_select))
                    }}
                </div>
            </Modal>
        </Show>
    }
}

fn partner_listing(listing: ListingView, on_select: Callback<PartnerId>) -> AnyView {
    match listing {
        ListingView::Loading => view! {
            <p class="partner-list__placeholder">"Loading logistics partners..."</p>
        }
        .into_any(),
        ListingView::Failed(message) => view! {
            <p class="partner-list__error">{message}</p>
        }
        .into_any(),
        ListingView::Empty => view! {
            <p class="partner-list__empty">{NO_PARTNERS_MESSAGE}</p>
        }
        .into_any(),
        ListingView::Entries(entries) => entries
            .into_iter()
            .map(|entry| partner_item(entry, on_select))
            .collect_view()
            .into_any(),
    }
}

fn partner_item(entry: PartnerEntry, on_select: Callback<PartnerId>) -> impl IntoView {
    let PartnerEntry {
        partner_id,
        name,
        contact,
        capacity,
        label,
        selectable,
    } = entry;
    let tag = partner_id.to_string();

    view! {
        <div class="partner-item">
            <div class="partner-item__info">
                <strong class="partner-item__name">{name}</strong>
                {contact.map(|line| view! { <small class="partner-item__detail">{line}</small> })}
                {capacity.map(|line| view! { <small class="partner-item__detail">{line}</small> })}
            </div>
            <button
                class="button button--primary select-partner-btn"
                data-partner-id=tag
                disabled=!selectable
                on:click=move |_| on_select.run(partner_id.clone())
            >
                {label}
            </button>
        </div>
    }
}
