use crate::config::selectors::SelectorConfig;
use crate::core::normalize::{normalize_url, parse_digits, price_from_man, year_from_text};
use crate::dom::{DomError, DomNode};
use crate::domain::model::{CarListing, ListingFields};
use crate::extract::fallback::{default_name_strategies, resolve_first, resolve_names, CardScope};
use crate::extract::fields::{extract_image_source, extract_link, extract_price, extract_spec_list};
use crate::extract::NameStrategy;

/// Result of normalizing one card. A fault stays inside the card it happened in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardOutcome {
    Accepted(CarListing),
    /// No usable image or detail link.
    Rejected,
    Faulted(DomError),
}

impl CardOutcome {
    pub fn into_listing(self) -> Option<CarListing> {
        match self {
            CardOutcome::Accepted(listing) => Some(listing),
            _ => None,
        }
    }
}

pub struct CardNormalizer {
    selectors: SelectorConfig,
    site_origin: String,
    name_strategies: Vec<NameStrategy>,
}

impl CardNormalizer {
    pub fn new(selectors: SelectorConfig, site_origin: impl Into<String>) -> Self {
        Self {
            selectors,
            site_origin: site_origin.into(),
            name_strategies: default_name_strategies(),
        }
    }

    pub fn with_name_strategies(mut self, strategies: Vec<NameStrategy>) -> Self {
        self.name_strategies = strategies;
        self
    }

    pub fn selectors(&self) -> &SelectorConfig {
        &self.selectors
    }

    pub fn normalize<N: DomNode>(&self, card: &N) -> CardOutcome {
        match self.try_normalize(card) {
            Ok(Some(listing)) => CardOutcome::Accepted(listing),
            Ok(None) => CardOutcome::Rejected,
            Err(e) => CardOutcome::Faulted(e),
        }
    }

    fn try_normalize<N: DomNode>(&self, card: &N) -> Result<Option<CarListing>, DomError> {
        let link = extract_link(card, &self.selectors.link)?;
        let image_node = resolve_first(card, &self.selectors.image)?;
        let image = match &image_node {
            Some(node) => extract_image_source(node, &self.selectors.image_src_attrs)?,
            None => None,
        };
        let specs = extract_spec_list(card, &self.selectors.info_items)?;
        let price = extract_price(card, &self.selectors.price)?;

        let scope = CardScope {
            card,
            image: image_node.as_ref(),
            selectors: &self.selectors,
        };
        let names = resolve_names(&self.name_strategies, &scope)?;

        let fields = ListingFields {
            brand: names.brand,
            model: names.model,
            year: specs.year.as_deref().and_then(year_from_text),
            mileage_km: specs.mileage.as_deref().and_then(parse_digits),
            price_krw: price.as_deref().and_then(price_from_man),
        };

        let link = normalize_url(link.as_deref().unwrap_or_default().trim(), &self.site_origin);
        let image = normalize_url(image.as_deref().unwrap_or_default(), &self.site_origin);

        Ok(CarListing::new(fields, &image, &link))
    }
}
