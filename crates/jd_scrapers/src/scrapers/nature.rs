//! Layout of the publisher's current-issue pages.

use url::Url;

pub const BASE_URL: &str = "https://www.nature.com";

pub const ARTICLE_SELECTOR: &str = "article";
pub const TITLE_SELECTOR: &str = "h3.c-card__title";
pub const URL_SELECTOR: &str = "h3.c-card__title a";
pub const ABSTRACT_SELECTOR: &str = "div.c-card__summary";

pub fn base_url() -> Url {
    Url::parse(BASE_URL).expect("BASE_URL is a valid URL")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    #[test]
    fn test_selectors_parse() {
        for selector in [ARTICLE_SELECTOR, TITLE_SELECTOR, URL_SELECTOR, ABSTRACT_SELECTOR] {
            assert!(Selector::parse(selector).is_ok(), "{}", selector);
        }
    }

    #[test]
    fn test_base_url() {
        assert_eq!(base_url().host_str(), Some("www.nature.com"));
    }
}
