use serde::{Deserialize, Serialize};

/// CSS selectors for one listing layout. Defaults target Encar's big-image
/// list view, whose class names carry a build hash suffix (hence `^=`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub card: String,
    pub link: String,
    /// Tried in order; the first one with a match resolves the card image.
    pub image: Vec<String>,
    pub image_src_attrs: Vec<String>,
    pub title: String,
    pub info_items: String,
    pub price: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            card: r#"div[class^="ItemBigImage_item__"]"#.to_string(),
            link: r#"a[class^="ItemBigImage_link_item__"]"#.to_string(),
            image: vec![
                r#"div[class^="CarPhotoSwiper_swiper_wrap__"] img"#.to_string(),
                "img".to_string(),
            ],
            image_src_attrs: vec!["src".to_string(), "data-src".to_string()],
            title: r#"strong[class^="ItemBigImage_name__"]"#.to_string(),
            info_items: r#"ul[class^="ItemBigImage_info__"] > li"#.to_string(),
            price: r#"div[class^="ItemBigImage_price_area__"] span[class^="ItemBigImage_num__"]"#
                .to_string(),
        }
    }
}

pub const DEFAULT_SITE_ORIGIN: &str = "https://car.encar.com";

pub const DEFAULT_START_URL: &str = "https://car.encar.com/list/car?page=1\
&search=%7B%22type%22%3A%22car%22%2C%22action%22%3A%22(And.Hidden.N._.MultiViewHidden.N.)%22,\
%22toggle%22%3A%7B%7D,%22layer%22%3A%22%22,%22sort%22%3A%22MobileModifiedDate%22%7D";

pub const DEFAULT_MAX_CARDS: usize = 30;
