use crate::domain::model::RawFieldValue;
use crate::dom::{DomError, DomNode};
use crate::extract::fallback::NameParts;

/// Raw strings of the card's spec list: model year, then mileage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecList {
    pub year: RawFieldValue,
    pub mileage: RawFieldValue,
}

pub fn extract_link<N: DomNode>(card: &N, selector: &str) -> Result<RawFieldValue, DomError> {
    match card.find_first(selector)? {
        Some(anchor) => anchor.attr("href"),
        None => Ok(None),
    }
}

/// First non-blank attribute out of `attrs`, so lazy-loaded images fall back
/// from `src` to `data-src`.
pub fn extract_image_source<N: DomNode>(
    image: &N,
    attrs: &[String],
) -> Result<RawFieldValue, DomError> {
    for attr in attrs {
        if let Some(value) = image.attr(attr)? {
            if !value.trim().is_empty() {
                return Ok(Some(value.trim().to_string()));
            }
        }
    }
    Ok(None)
}

pub fn extract_title<N: DomNode>(card: &N, selector: &str) -> Result<NameParts, DomError> {
    let Some(title) = card.find_first(selector)? else {
        return Ok(NameParts::default());
    };
    let text = title.text()?;
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    Ok(NameParts {
        brand: lines.next().map(str::to_string),
        model: lines.next().map(str::to_string),
    })
}

pub fn extract_spec_list<N: DomNode>(card: &N, selector: &str) -> Result<SpecList, DomError> {
    let items = card.find_all(selector)?;
    let read = |index: usize| -> Result<RawFieldValue, DomError> {
        match items.get(index) {
            Some(item) => Ok(Some(item.text()?.trim().to_string())),
            None => Ok(None),
        }
    };

    Ok(SpecList {
        year: read(0)?,
        mileage: read(1)?,
    })
}

pub fn extract_price<N: DomNode>(card: &N, selector: &str) -> Result<RawFieldValue, DomError> {
    match card.find_first(selector)? {
        Some(num) => Ok(Some(num.text()?.trim().to_string())),
        None => Ok(None),
    }
}

pub fn extract_alt_text<N: DomNode>(image: &N) -> Result<RawFieldValue, DomError> {
    image.attr("alt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;

    fn card_of(html: &str) -> HtmlDocument {
        HtmlDocument::parse(&format!("<div class=\"card\">{}</div>", html))
    }

    #[test]
    fn test_link_reads_first_anchor() {
        let doc = card_of(r#"<a class="go" href="/cars/1">x</a><a class="go" href="/cars/2">y</a>"#);
        assert_eq!(
            extract_link(&doc.root(), "a.go").unwrap().as_deref(),
            Some("/cars/1")
        );
        assert_eq!(extract_link(&doc.root(), "a.missing").unwrap(), None);
    }

    #[test]
    fn test_image_source_falls_back_to_lazy_attr() {
        let doc = card_of(r#"<img src="" data-src="//ci.encar.com/1.jpg">"#);
        let img = doc.root().find_first("img").unwrap().unwrap();
        let attrs = vec!["src".to_string(), "data-src".to_string()];
        assert_eq!(
            extract_image_source(&img, &attrs).unwrap().as_deref(),
            Some("//ci.encar.com/1.jpg")
        );
    }

    #[test]
    fn test_title_splits_lines() {
        let doc = card_of("<strong class=\"name\">\n  기아\n\n  K5 3세대 \n</strong>");
        let names = extract_title(&doc.root(), "strong.name").unwrap();
        assert_eq!(names.brand.as_deref(), Some("기아"));
        assert_eq!(names.model.as_deref(), Some("K5 3세대"));
    }

    #[test]
    fn test_title_with_one_line_has_no_model() {
        let doc = card_of("<strong class=\"name\">제네시스</strong>");
        let names = extract_title(&doc.root(), "strong.name").unwrap();
        assert_eq!(names.brand.as_deref(), Some("제네시스"));
        assert_eq!(names.model, None);
    }

    #[test]
    fn test_spec_list_short_list() {
        let doc = card_of("<ul class=\"info\"><li> 22/07식 </li></ul>");
        let specs = extract_spec_list(&doc.root(), "ul.info > li").unwrap();
        assert_eq!(specs.year.as_deref(), Some("22/07식"));
        assert_eq!(specs.mileage, None);
    }

    #[test]
    fn test_price_missing_region() {
        let doc = card_of("<div class=\"price\"></div>");
        assert_eq!(extract_price(&doc.root(), "div.price span.num").unwrap(), None);
    }
}
