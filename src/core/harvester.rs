use crate::config::selectors::DEFAULT_MAX_CARDS;
use crate::core::card::{CardNormalizer, CardOutcome};
use crate::dom::{DomNode, HtmlDocument};
use crate::domain::model::{HarvestStats, PageHarvest};
use crate::utils::error::{HarvestError, Result};

/// Walks the listing cards of one rendered page.
pub struct ListingHarvester {
    normalizer: CardNormalizer,
    max_cards: usize,
}

impl ListingHarvester {
    pub fn new(normalizer: CardNormalizer) -> Self {
        Self {
            normalizer,
            max_cards: DEFAULT_MAX_CARDS,
        }
    }

    pub fn with_max_cards(mut self, max_cards: usize) -> Self {
        self.max_cards = max_cards;
        self
    }

    pub fn harvest_html(&self, url: &str, html: &str) -> Result<PageHarvest> {
        let document = HtmlDocument::parse(html);
        self.harvest(url, &document.root())
    }

    /// Normalizes up to `max_cards` cards in document order.
    ///
    /// Failing to locate any card is a page-level error. Anything that goes
    /// wrong inside a single card only costs that card.
    pub fn harvest<N: DomNode>(&self, url: &str, root: &N) -> Result<PageHarvest> {
        let card_selector = &self.normalizer.selectors().card;
        let cards = root
            .find_all(card_selector)
            .map_err(|e| HarvestError::PageNotReady {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if cards.is_empty() {
            return Err(HarvestError::PageNotReady {
                url: url.to_string(),
                reason: format!("no cards matched '{}'", card_selector),
            });
        }

        let mut stats = HarvestStats {
            cards_found: cards.len(),
            ..HarvestStats::default()
        };
        let mut cars = Vec::new();

        for (index, card) in cards.iter().take(self.max_cards).enumerate() {
            stats.cards_considered += 1;
            match self.normalizer.normalize(card) {
                CardOutcome::Accepted(listing) => {
                    stats.accepted += 1;
                    cars.push(listing);
                }
                CardOutcome::Rejected => stats.rejected += 1,
                CardOutcome::Faulted(e) => {
                    tracing::debug!("Skipping card {} on {}: {}", index, url, e);
                    stats.faulted += 1;
                }
            }
        }

        tracing::debug!(
            "Harvested {} of {} cards from {} ({} rejected, {} faulted)",
            stats.accepted,
            stats.cards_considered,
            url,
            stats.rejected,
            stats.faulted
        );

        Ok(PageHarvest {
            url: url.to_string(),
            cars,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::selectors::{SelectorConfig, DEFAULT_SITE_ORIGIN};
    use crate::dom::DomError;

    /// In-memory card tree keyed by selector strings.
    #[derive(Debug, Clone, Default)]
    struct FakeNode {
        children: Vec<(&'static str, FakeNode)>,
        attrs: Vec<(&'static str, &'static str)>,
        text: &'static str,
        broken_selector: Option<&'static str>,
    }

    impl FakeNode {
        fn child(mut self, selector: &'static str, node: FakeNode) -> Self {
            self.children.push((selector, node));
            self
        }

        fn with_attr(mut self, name: &'static str, value: &'static str) -> Self {
            self.attrs.push((name, value));
            self
        }

        fn with_text(text: &'static str) -> Self {
            Self {
                text,
                ..Self::default()
            }
        }

        fn breaking_on(mut self, selector: &'static str) -> Self {
            self.broken_selector = Some(selector);
            self
        }
    }

    impl DomNode for FakeNode {
        fn find_all(&self, selector: &str) -> std::result::Result<Vec<Self>, DomError> {
            if self.broken_selector == Some(selector) {
                return Err(DomError::NodeUnavailable {
                    message: format!("lookup of '{}' failed", selector),
                });
            }
            Ok(self
                .children
                .iter()
                .filter(|(key, _)| *key == selector)
                .map(|(_, node)| node.clone())
                .collect())
        }

        fn text(&self) -> std::result::Result<String, DomError> {
            Ok(self.text.to_string())
        }

        fn attr(&self, name: &str) -> std::result::Result<Option<String>, DomError> {
            Ok(self
                .attrs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string()))
        }
    }

    fn fake_selectors() -> SelectorConfig {
        SelectorConfig {
            card: "card".to_string(),
            link: "link".to_string(),
            image: vec!["photo".to_string(), "img".to_string()],
            image_src_attrs: vec!["src".to_string(), "data-src".to_string()],
            title: "title".to_string(),
            info_items: "info".to_string(),
            price: "price".to_string(),
        }
    }

    fn good_card(id: &'static str) -> FakeNode {
        FakeNode::default()
            .child("link", FakeNode::default().with_attr("href", id))
            .child("img", FakeNode::default().with_attr("src", "//img/car.jpg"))
            .child("title", FakeNode::with_text("Kia\nK5"))
            .child("info", FakeNode::with_text("2019식"))
            .child("info", FakeNode::with_text("12,000km"))
            .child("price", FakeNode::with_text("1,990"))
    }

    fn harvester() -> ListingHarvester {
        ListingHarvester::new(CardNormalizer::new(fake_selectors(), DEFAULT_SITE_ORIGIN))
    }

    #[test]
    fn test_faulty_card_does_not_affect_siblings() {
        let page = FakeNode::default()
            .child("card", good_card("/cars/1"))
            .child("card", good_card("/cars/2").breaking_on("price"))
            .child("card", good_card("/cars/3"));

        let harvest = harvester().harvest("page-1", &page).unwrap();

        assert_eq!(harvest.cars.len(), 2);
        assert_eq!(harvest.cars[0].link, "https://car.encar.com/cars/1");
        assert_eq!(harvest.cars[1].link, "https://car.encar.com/cars/3");
        assert_eq!(harvest.cars[1].year, Some(2019));
        assert_eq!(harvest.cars[1].mileage_km, Some(12_000));
        assert_eq!(harvest.cars[1].price_krw, Some(19_900_000));
        assert_eq!(harvest.stats.faulted, 1);
        assert_eq!(harvest.stats.accepted, 2);
    }

    #[test]
    fn test_fault_in_any_extractor_is_isolated() {
        for broken in ["link", "photo", "img", "title", "info", "price"] {
            let page = FakeNode::default()
                .child("card", good_card("/cars/1").breaking_on(broken))
                .child("card", good_card("/cars/2"));

            let harvest = harvester().harvest("page-1", &page).unwrap();
            assert_eq!(harvest.cars.len(), 1, "broken selector {}", broken);
            assert_eq!(harvest.cars[0].link, "https://car.encar.com/cars/2");
        }
    }

    #[test]
    fn test_cards_beyond_cap_are_ignored() {
        let mut page = FakeNode::default();
        for _ in 0..5 {
            page = page.child("card", good_card("/cars/n"));
        }

        let harvest = harvester().with_max_cards(3).harvest("page-1", &page).unwrap();
        assert_eq!(harvest.cars.len(), 3);
        assert_eq!(harvest.stats.cards_found, 5);
        assert_eq!(harvest.stats.cards_considered, 3);
    }

    #[test]
    fn test_page_without_cards_is_not_ready() {
        let page = FakeNode::default();
        let err = harvester().harvest("page-9", &page).unwrap_err();
        assert!(matches!(err, HarvestError::PageNotReady { .. }));
    }

    #[test]
    fn test_card_lookup_failure_is_page_level() {
        let page = FakeNode::default()
            .child("card", good_card("/cars/1"))
            .breaking_on("card");
        let err = harvester().harvest("page-1", &page).unwrap_err();
        assert!(matches!(err, HarvestError::PageNotReady { .. }));
    }
}
