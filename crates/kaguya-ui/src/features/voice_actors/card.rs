//! Voice actor card model and render memo.

use std::rc::Rc;

use kaguya_api_models::VoiceActor;

/// Route prefix of the voice actor detail page.
pub const DETAILS_ROUTE: &str = "/voice-actors/details";

/// Everything a voice actor card displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceActorCard {
    /// Link to the detail page.
    pub href: String,
    /// Portrait URL.
    pub image_src: String,
    /// Image alt text.
    pub alt: String,
    /// Caption under the portrait.
    pub label: String,
}

impl From<&VoiceActor> for VoiceActorCard {
    fn from(actor: &VoiceActor) -> Self {
        Self {
            href: details_href(actor.id),
            image_src: actor.image.large.clone(),
            alt: actor.name.user_preferred.clone(),
            label: actor.name.user_preferred.clone(),
        }
    }
}

/// Detail page link for a voice actor.
#[must_use]
pub fn details_href(id: u64) -> String {
    format!("{DETAILS_ROUTE}/{id}")
}

/// Recomputes a card only when handed a different entity allocation.
#[derive(Debug, Default)]
pub struct CardMemo {
    cached: Option<(Rc<VoiceActor>, VoiceActorCard)>,
    computations: usize,
}

impl CardMemo {
    /// Card for `actor`, reusing the previous output while the entity is the same allocation.
    pub fn render(&mut self, actor: &Rc<VoiceActor>) -> &VoiceActorCard {
        let stale = self
            .cached
            .as_ref()
            .is_none_or(|(previous, _)| !Rc::ptr_eq(previous, actor));
        if stale {
            self.computations += 1;
            self.cached = None;
        }
        let (_, card) = self
            .cached
            .get_or_insert_with(|| (Rc::clone(actor), VoiceActorCard::from(actor.as_ref())));
        card
    }

    /// Number of times a card was built.
    #[must_use]
    pub const fn computations(&self) -> usize {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaguya_api_models::{PersonImage, PersonName};

    fn actor(id: u64, name: &str) -> VoiceActor {
        VoiceActor {
            id,
            name: PersonName {
                user_preferred: name.to_string(),
                native: None,
            },
            image: PersonImage {
                large: format!("https://img.example/{id}.jpg"),
                medium: None,
            },
        }
    }

    #[test]
    fn card_links_to_details_and_labels_with_the_preferred_name() {
        let card = VoiceActorCard::from(&actor(95_185, "Kana Hanazawa"));
        assert_eq!(card.href, "/voice-actors/details/95185");
        assert_eq!(card.image_src, "https://img.example/95185.jpg");
        assert_eq!(card.alt, "Kana Hanazawa");
        assert_eq!(card.label, "Kana Hanazawa");
    }

    #[test]
    fn memo_skips_identical_allocations() {
        let mut memo = CardMemo::default();
        let first = Rc::new(actor(1, "Mamoru Miyano"));
        memo.render(&first);
        memo.render(&Rc::clone(&first));
        assert_eq!(memo.computations(), 1);

        let equal_but_new = Rc::new(actor(1, "Mamoru Miyano"));
        assert_eq!(memo.render(&equal_but_new).label, "Mamoru Miyano");
        assert_eq!(memo.computations(), 2);
    }
}
