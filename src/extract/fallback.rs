//! Ordered fallback chains for card fields that have more than one source.

use crate::config::selectors::SelectorConfig;
use crate::dom::{DomError, DomNode};
use crate::extract::fields::{extract_alt_text, extract_title};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameParts {
    pub brand: Option<String>,
    pub model: Option<String>,
}

impl NameParts {
    pub fn is_complete(&self) -> bool {
        self.brand.is_some() && self.model.is_some()
    }

    /// Takes values from `other` only where `self` has none.
    pub fn fill_missing(&mut self, other: NameParts) {
        if self.brand.is_none() {
            self.brand = other.brand;
        }
        if self.model.is_none() {
            self.model = other.model;
        }
    }
}

/// Resolves the card image node: the first selector with a match wins.
pub fn resolve_first<N: DomNode>(card: &N, selectors: &[String]) -> Result<Option<N>, DomError> {
    for selector in selectors {
        if let Some(node) = card.find_first(selector)? {
            return Ok(Some(node));
        }
    }
    Ok(None)
}

/// Turns an image `alt` text into brand/model candidates.
pub trait AltTextSplitter: Send + Sync {
    fn split(&self, alt: &str) -> NameParts;
}

/// First token is the brand, the next `model_tokens` tokens are the model.
#[derive(Debug, Clone, Copy)]
pub struct LeadingTokenSplitter {
    pub model_tokens: usize,
}

impl Default for LeadingTokenSplitter {
    fn default() -> Self {
        Self { model_tokens: 2 }
    }
}

impl AltTextSplitter for LeadingTokenSplitter {
    fn split(&self, alt: &str) -> NameParts {
        let tokens: Vec<&str> = alt.split_whitespace().collect();
        let Some((brand, rest)) = tokens.split_first() else {
            return NameParts::default();
        };
        let model: Vec<&str> = rest.iter().take(self.model_tokens).copied().collect();

        NameParts {
            brand: Some(brand.to_string()),
            model: (!model.is_empty()).then(|| model.join(" ")),
        }
    }
}

/// What a name strategy can look at for one card.
pub struct CardScope<'c, N> {
    pub card: &'c N,
    pub image: Option<&'c N>,
    pub selectors: &'c SelectorConfig,
}

/// One source of brand/model, tried in order until both are known.
pub enum NameStrategy {
    TitleLines,
    AltText(Box<dyn AltTextSplitter>),
}

impl NameStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            NameStrategy::TitleLines => "title",
            NameStrategy::AltText(_) => "alt-text",
        }
    }

    pub fn resolve<N: DomNode>(&self, scope: &CardScope<'_, N>) -> Result<NameParts, DomError> {
        match self {
            NameStrategy::TitleLines => extract_title(scope.card, &scope.selectors.title),
            NameStrategy::AltText(splitter) => {
                let Some(image) = scope.image else {
                    return Ok(NameParts::default());
                };
                Ok(extract_alt_text(image)?
                    .map(|alt| splitter.split(&alt))
                    .unwrap_or_default())
            }
        }
    }
}

impl std::fmt::Debug for NameStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Title lines first, then the image alt text.
pub fn default_name_strategies() -> Vec<NameStrategy> {
    vec![
        NameStrategy::TitleLines,
        NameStrategy::AltText(Box::new(LeadingTokenSplitter::default())),
    ]
}

/// Runs `strategies` in order, each filling only what is still missing.
pub fn resolve_names<N: DomNode>(
    strategies: &[NameStrategy],
    scope: &CardScope<'_, N>,
) -> Result<NameParts, DomError> {
    let mut names = NameParts::default();
    for strategy in strategies {
        if names.is_complete() {
            break;
        }
        names.fill_missing(strategy.resolve(scope)?);
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;

    #[test]
    fn test_leading_token_splitter() {
        let splitter = LeadingTokenSplitter::default();
        let parts = splitter.split("현대 쏘나타 DN8 2.0 가솔린");
        assert_eq!(parts.brand.as_deref(), Some("현대"));
        assert_eq!(parts.model.as_deref(), Some("쏘나타 DN8"));

        let single = splitter.split("  BMW ");
        assert_eq!(single.brand.as_deref(), Some("BMW"));
        assert_eq!(single.model, None);

        assert_eq!(splitter.split("   "), NameParts::default());
    }

    #[test]
    fn test_fill_missing_keeps_existing() {
        let mut names = NameParts {
            brand: Some("Kia".to_string()),
            model: None,
        };
        names.fill_missing(NameParts {
            brand: Some("Other".to_string()),
            model: Some("K5".to_string()),
        });
        assert_eq!(names.brand.as_deref(), Some("Kia"));
        assert_eq!(names.model.as_deref(), Some("K5"));
    }

    #[test]
    fn test_resolve_first_prefers_earlier_selector() {
        let doc = HtmlDocument::parse(
            r#"<img id="logo" src="/logo.png"><div class="swiper"><img id="photo" src="/p.jpg"></div>"#,
        );
        let selectors = vec!["div.swiper img".to_string(), "img".to_string()];
        let image = resolve_first(&doc.root(), &selectors).unwrap().unwrap();
        assert_eq!(image.attr("id").unwrap().as_deref(), Some("photo"));
    }

    #[test]
    fn test_alt_text_without_image_yields_nothing() {
        let doc = HtmlDocument::parse("<div></div>");
        let root = doc.root();
        let selectors = SelectorConfig::default();
        let scope = CardScope {
            card: &root,
            image: None,
            selectors: &selectors,
        };
        let names = resolve_names(&default_name_strategies(), &scope).unwrap();
        assert_eq!(names, NameParts::default());
    }
}
