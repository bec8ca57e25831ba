//! Keystroke-driven filter over server-rendered listing cards.

use std::rc::Rc;

use web_sys::{Document, HtmlElement, HtmlInputElement};

use crate::shared::config::PageBindings;
use crate::shared::dom::{element_by_id, listen, query_all, set_shown};
use crate::shared::error::FrontendError;

/// Case-insensitive substring match; an empty query matches every card
pub fn card_matches(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}

/// Visibility of each name for `query`, index-aligned with `names`
pub fn visible_mask<S: AsRef<str>>(names: &[S], query: &str) -> Vec<bool> {
    names
        .iter()
        .map(|name| card_matches(name.as_ref(), query))
        .collect()
}

/// One listing card and the name it is matched by
struct Card {
    element: HtmlElement,
    name: String,
}

/// Read-only view over the cards present when the page loaded
pub struct CardList {
    cards: Vec<Card>,
}

impl CardList {
    pub fn collect(document: &Document, bindings: &PageBindings) -> Result<Self, FrontendError> {
        let cards = query_all(document, &bindings.card_selector)?
            .into_iter()
            .map(|element| {
                let name = card_name(&element, bindings);
                Card { element, name }
            })
            .collect();
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Show matching cards, hide the rest; returns how many are visible
    pub fn apply(&self, query: &str) -> usize {
        let names: Vec<&str> = self.cards.iter().map(|c| c.name.as_str()).collect();
        let mask = visible_mask(&names, query);
        for (card, shown) in self.cards.iter().zip(&mask) {
            set_shown(&card.element, *shown);
        }
        mask.into_iter().filter(|shown| *shown).count()
    }
}

/// Name from the attribute, then the title child's text, then the card's own
/// text. Blank candidates are skipped.
pub fn resolve_card_name(
    attribute: Option<String>,
    title: Option<String>,
    own_text: Option<String>,
) -> String {
    [attribute, title, own_text]
        .into_iter()
        .flatten()
        .map(|candidate| candidate.trim().to_string())
        .find(|candidate| !candidate.is_empty())
        .unwrap_or_default()
}

fn card_name(card: &HtmlElement, bindings: &PageBindings) -> String {
    let title = card
        .query_selector(&bindings.card_name_selector)
        .ok()
        .flatten()
        .and_then(|title| title.text_content());
    resolve_card_name(
        card.get_attribute(&bindings.card_name_attribute),
        title,
        card.text_content(),
    )
}

/// The search input bound to its card list
pub struct SearchFilter {
    input: HtmlInputElement,
    cards: CardList,
}

impl SearchFilter {
    /// Re-run the filter with the input's current text
    pub fn run(&self) -> usize {
        let query = self.input.value();
        let visible = self.cards.apply(&query);
        log::debug!(
            "search '{}': {} of {} cards visible",
            query,
            visible,
            self.cards.len()
        );
        visible
    }

    /// Replace the search text (voice results) and filter with it
    pub fn set_query(&self, query: &str) -> usize {
        self.input.set_value(query);
        self.run()
    }
}

/// Wire the search input's `keyup` to the card filter.
///
/// Returns `None` when the page has no search input.
pub fn attach(
    document: &Document,
    bindings: &PageBindings,
) -> Result<Option<Rc<SearchFilter>>, FrontendError> {
    let Some(input) = element_by_id::<HtmlInputElement>(document, &bindings.search_input_id)? else {
        log::debug!("no #{} on this page, search disabled", bindings.search_input_id);
        return Ok(None);
    };

    let cards = CardList::collect(document, bindings)?;
    if cards.is_empty() {
        log::debug!("no cards match '{}' on this page", bindings.card_selector);
    } else {
        log::debug!("search filter bound to {} cards", cards.len());
    }

    let filter = Rc::new(SearchFilter { input, cards });
    let on_keyup = Rc::clone(&filter);
    listen(&filter.input, "keyup", move |_| {
        on_keyup.run();
    })?;

    Ok(Some(filter))
}
