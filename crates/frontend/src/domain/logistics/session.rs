//! Lifecycle of the logistics dialog: closed, or open for one order.

use contracts::domain::common::{OrderId, PartnerId};
use contracts::domain::logistics_partner::LogisticsPartner;

use crate::shared::error::FrontendError;

pub const NO_PARTNERS_MESSAGE: &str = "No logistics partners are available right now.";
pub const LOAD_FAILURE_MESSAGE: &str = "Could not load logistics partners. Please try again.";
pub const ASSIGN_FAILURE_MESSAGE: &str = "Could not assign the logistics partner. Please try again.";
pub const SELECT_LABEL: &str = "Select";
pub const ASSIGNING_LABEL: &str = "Assigning...";

/// Identifies one open/close cycle; bumped on every open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum PartnerListing {
    Loading,
    Loaded(Vec<LogisticsPartner>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenSession {
    pub order_id: OrderId,
    pub generation: Generation,
    pub listing: PartnerListing,
    /// Partner whose assignment request is in flight
    pub pending: Option<PartnerId>,
}

/// What the partner list container should display
#[derive(Debug, Clone, PartialEq)]
pub enum ListingView {
    Loading,
    Failed(String),
    /// Explicit "no partners" message rather than an empty list
    Empty,
    Entries(Vec<PartnerEntry>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartnerEntry {
    pub partner_id: PartnerId,
    pub name: String,
    pub contact: Option<String>,
    pub capacity: Option<String>,
    pub label: &'static str,
    pub selectable: bool,
}

impl OpenSession {
    pub fn listing_view(&self) -> ListingView {
        match &self.listing {
            PartnerListing::Loading => ListingView::Loading,
            PartnerListing::Failed(message) => ListingView::Failed(message.clone()),
            PartnerListing::Loaded(partners) if partners.is_empty() => ListingView::Empty,
            PartnerListing::Loaded(partners) => ListingView::Entries(
                partners
                    .iter()
                    .map(|partner| {
                        let in_flight = self.pending.as_ref() == Some(&partner.id);
                        PartnerEntry {
                            partner_id: partner.id.clone(),
                            name: partner.name.clone(),
                            contact: partner.contact_line(),
                            capacity: partner.capacity_line(),
                            label: if in_flight { ASSIGNING_LABEL } else { SELECT_LABEL },
                            selectable: self.pending.is_none(),
                        }
                    })
                    .collect(),
            ),
        }
    }
}

/// Everything an assignment response needs to find its session again
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentTicket {
    pub generation: Generation,
    pub order_id: OrderId,
    pub partner_id: PartnerId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// Dialog closed; the page must reload to show the new order status
    Assigned { message: Option<String> },
    /// Dialog stays open with the control restored
    Rejected { message: String },
    /// Response belongs to a session that was closed or replaced
    Stale { assigned: bool },
}

impl AssignmentOutcome {
    /// A stale success still changed server state; reload unless the user
    /// is busy with another dialog.
    pub fn reloads_page(&self, modal_open: bool) -> bool {
        match self {
            AssignmentOutcome::Assigned { .. } => true,
            AssignmentOutcome::Stale { assigned } => *assigned && !modal_open,
            AssignmentOutcome::Rejected { .. } => false,
        }
    }
}

/// The logistics dialog state. At most one session is open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalSession {
    open: Option<OpenSession>,
    last_generation: u64,
}

impl ModalSession {
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn order_id(&self) -> Option<&OrderId> {
        self.open.as_ref().map(|s| &s.order_id)
    }

    pub fn listing_view(&self) -> Option<ListingView> {
        self.open.as_ref().map(OpenSession::listing_view)
    }

    /// closed -> open(order_id). Opening over an open session replaces it.
    pub fn open(&mut self, order_id: OrderId) -> Generation {
        if let Some(previous) = &self.open {
            log::debug!("replacing logistics session for order {}", previous.order_id);
        }
        self.last_generation += 1;
        let generation = Generation(self.last_generation);
        self.open = Some(OpenSession {
            order_id,
            generation,
            listing: PartnerListing::Loading,
            pending: None,
        });
        generation
    }

    /// open -> closed; returns the order the dialog was open for
    pub fn close(&mut self) -> Option<OrderId> {
        self.open.take().map(|s| s.order_id)
    }

    fn session_mut(&mut self, generation: Generation) -> Option<&mut OpenSession> {
        self.open.as_mut().filter(|s| s.generation == generation)
    }

    /// Apply a partner-list response; `false` if its session is gone
    pub fn partners_loaded(
        &mut self,
        generation: Generation,
        result: Result<Vec<LogisticsPartner>, FrontendError>,
    ) -> bool {
        let Some(session) = self.session_mut(generation) else {
            return false;
        };
        session.listing = match result {
            Ok(partners) => PartnerListing::Loaded(partners),
            Err(e) => {
                log::warn!("loading logistics partners failed: {}", e);
                PartnerListing::Failed(e.user_message(LOAD_FAILURE_MESSAGE))
            }
        };
        true
    }

    /// Mark `partner_id` as in flight. Refused while loading, for unknown
    /// partners, or while another assignment is outstanding.
    pub fn begin_assignment(&mut self, partner_id: PartnerId) -> Option<AssignmentTicket> {
        let session = self.open.as_mut()?;
        if session.pending.is_some() {
            return None;
        }
        let PartnerListing::Loaded(partners) = &session.listing else {
            return None;
        };
        if !partners.iter().any(|p| p.id == partner_id) {
            log::warn!("partner {} is not in the current listing", partner_id);
            return None;
        }
        session.pending = Some(partner_id.clone());
        Some(AssignmentTicket {
            generation: session.generation,
            order_id: session.order_id.clone(),
            partner_id,
        })
    }

    pub fn finish_assignment(
        &mut self,
        ticket: &AssignmentTicket,
        result: Result<Option<String>, FrontendError>,
    ) -> AssignmentOutcome {
        if self.session_mut(ticket.generation).is_none() {
            return AssignmentOutcome::Stale {
                assigned: result.is_ok(),
            };
        }
        match result {
            Ok(message) => {
                self.open = None;
                AssignmentOutcome::Assigned { message }
            }
            Err(e) => {
                log::warn!(
                    "assigning partner {} to order {} failed: {}",
                    ticket.partner_id,
                    ticket.order_id,
                    e
                );
                if let Some(session) = self.open.as_mut() {
                    session.pending = None;
                }
                AssignmentOutcome::Rejected {
                    message: e.user_message(ASSIGN_FAILURE_MESSAGE),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str) -> OrderId {
        OrderId::parse(id).unwrap()
    }

    fn partner_id(id: &str) -> PartnerId {
        PartnerId::parse(id).unwrap()
    }

    fn acme() -> Vec<LogisticsPartner> {
        serde_json::from_str(r#"[{"id": "p1", "name": "Acme"}]"#).unwrap()
    }

    fn two_partners() -> Vec<LogisticsPartner> {
        serde_json::from_str(
            r#"[{"id": 1, "name": "AgriConnect Logistics", "phone": "9876543210", "rating": 4.7},
                {"id": 2, "name": "FarmHaul", "phone": "8765432109", "rating": 4.5}]"#,
        )
        .unwrap()
    }

    fn opened_with(partners: Vec<LogisticsPartner>) -> ModalSession {
        let mut session = ModalSession::default();
        let generation = session.open(order("42"));
        assert!(session.partners_loaded(generation, Ok(partners)));
        session
    }

    #[test]
    fn test_open_shows_loading_placeholder() {
        let mut session = ModalSession::default();
        assert!(!session.is_open());
        session.open(order("42"));
        assert_eq!(session.order_id(), Some(&order("42")));
        assert_eq!(session.listing_view(), Some(ListingView::Loading));
    }

    #[test]
    fn test_single_partner_renders_one_entry() {
        let session = opened_with(acme());
        let Some(ListingView::Entries(entries)) = session.listing_view() else {
            panic!("expected entries");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].partner_id, partner_id("p1"));
        assert_eq!(entries[0].name, "Acme");
        assert_eq!(entries[0].label, SELECT_LABEL);
        assert!(entries[0].selectable);
    }

    #[test]
    fn test_empty_partner_list_is_explicit() {
        let session = opened_with(Vec::new());
        assert_eq!(session.listing_view(), Some(ListingView::Empty));
    }

    #[test]
    fn test_load_failure_shows_message() {
        let mut session = ModalSession::default();
        let generation = session.open(order("42"));
        session.partners_loaded(
            generation,
            Err(FrontendError::Server {
                status: 500,
                message: None,
            }),
        );
        assert_eq!(
            session.listing_view(),
            Some(ListingView::Failed(LOAD_FAILURE_MESSAGE.to_string()))
        );
    }

    #[test]
    fn test_selection_marks_control_busy() {
        let mut session = opened_with(two_partners());
        let ticket = session.begin_assignment(partner_id("2")).unwrap();
        assert_eq!(ticket.order_id, order("42"));
        assert_eq!(ticket.partner_id, partner_id("2"));

        let Some(ListingView::Entries(entries)) = session.listing_view() else {
            panic!("expected entries");
        };
        assert_eq!(entries[0].label, SELECT_LABEL);
        assert_eq!(entries[1].label, ASSIGNING_LABEL);
        assert!(entries.iter().all(|e| !e.selectable));

        // a second selection waits for the first to settle
        assert_eq!(session.begin_assignment(partner_id("1")), None);
    }

    #[test]
    fn test_selection_refused_until_loaded_or_unknown() {
        let mut session = ModalSession::default();
        assert_eq!(session.begin_assignment(partner_id("p1")), None);
        session.open(order("42"));
        assert_eq!(session.begin_assignment(partner_id("p1")), None);

        let mut session = opened_with(acme());
        assert_eq!(session.begin_assignment(partner_id("p9")), None);
    }

    #[test]
    fn test_success_closes_dialog() {
        let mut session = opened_with(acme());
        let ticket = session.begin_assignment(partner_id("p1")).unwrap();
        let outcome = session.finish_assignment(
            &ticket,
            Ok(Some("Logistics partner Acme assigned.".to_string())),
        );
        assert_eq!(
            outcome,
            AssignmentOutcome::Assigned {
                message: Some("Logistics partner Acme assigned.".to_string())
            }
        );
        assert!(outcome.reloads_page(session.is_open()));
        assert!(!session.is_open());
        assert_eq!(session.order_id(), None);
    }

    #[test]
    fn test_failure_restores_control_and_stays_open() {
        let mut session = opened_with(acme());
        let ticket = session.begin_assignment(partner_id("p1")).unwrap();
        let outcome = session.finish_assignment(
            &ticket,
            Err(FrontendError::Server {
                status: 404,
                message: Some("Logistics partner not found".to_string()),
            }),
        );
        assert_eq!(
            outcome,
            AssignmentOutcome::Rejected {
                message: "Logistics partner not found".to_string()
            }
        );
        assert!(!outcome.reloads_page(session.is_open()));
        assert_eq!(session.order_id(), Some(&order("42")));

        let Some(ListingView::Entries(entries)) = session.listing_view() else {
            panic!("expected entries");
        };
        assert_eq!(entries[0].label, SELECT_LABEL);
        assert!(entries[0].selectable);
    }

    #[test]
    fn test_close_clears_order_id() {
        let mut session = opened_with(acme());
        assert_eq!(session.close(), Some(order("42")));
        assert!(!session.is_open());
        assert_eq!(session.order_id(), None);
        assert_eq!(session.close(), None);
    }

    #[test]
    fn test_late_partner_list_is_discarded() {
        let mut session = ModalSession::default();
        let first = session.open(order("42"));
        session.close();
        let second = session.open(order("43"));

        assert!(!session.partners_loaded(first, Ok(acme())));
        assert_eq!(session.listing_view(), Some(ListingView::Loading));
        assert!(session.partners_loaded(second, Ok(Vec::new())));
        assert_eq!(session.listing_view(), Some(ListingView::Empty));
    }

    #[test]
    fn test_late_assignment_does_not_touch_new_session() {
        let mut session = opened_with(acme());
        let ticket = session.begin_assignment(partner_id("p1")).unwrap();
        session.close();
        let generation = session.open(order("43"));
        session.partners_loaded(generation, Ok(acme()));

        let outcome = session.finish_assignment(&ticket, Ok(None));
        assert_eq!(outcome, AssignmentOutcome::Stale { assigned: true });
        assert!(!outcome.reloads_page(session.is_open()));
        assert_eq!(session.order_id(), Some(&order("43")));
        let Some(ListingView::Entries(entries)) = session.listing_view() else {
            panic!("expected entries");
        };
        assert!(entries.iter().all(|e| e.selectable && e.label == SELECT_LABEL));
    }

    #[test]
    fn test_late_success_after_close_reloads() {
        let mut session = opened_with(acme());
        let ticket = session.begin_assignment(partner_id("p1")).unwrap();
        session.close();

        let outcome = session.finish_assignment(&ticket, Ok(None));
        assert!(outcome.reloads_page(session.is_open()));

        let failed = AssignmentOutcome::Stale { assigned: false };
        assert!(!failed.reloads_page(false));
    }
}
