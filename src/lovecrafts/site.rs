use crate::{utils, RawProductRecord, ScrapeError, Site};
use lazy_static::lazy_static;
use scraper::{Html, Selector};

pub const LISTING_URL: &str = concat!(
    "https://www.lovecrafts.com/en-us/l/yarns/yarns-by-weight/dk-yarn#?",
    "colour=1853&",
    "fiber_yarns=64%2C65%2C67%2C1646%2C1650%2C1651%2C1657%2C1659%2C1660%2C",
    "1836%2C6613%2C36872%2C60117%2C93531&"
);

const E: &str = "Invalid selector";
lazy_static! {
    static ref PRODUCT_ITEM: Selector = Selector::parse(".product-item").expect(E);
    static ref A: Selector = Selector::parse("a").expect(E);
    static ref NAME: Selector = Selector::parse(".product-name").expect(E);
    static ref BLEND: Selector = Selector::parse(".blend-attribute").expect(E);
    static ref WEIGHT: Selector = Selector::parse(".ball_weight_yarn-attribute").expect(E);
    static ref PRICE: Selector = Selector::parse(".price").expect(E);
    static ref LENGTH: Selector = Selector::parse(".yarn_length-attribute").expect(E);
}

#[derive(Debug)]
pub struct LoveCrafts;

impl LoveCrafts {
    fn required(
        url: &str,
        doc: &Html,
        selector: &Selector,
        name: &'static str,
    ) -> Result<String, ScrapeError> {
        utils::first_text(doc, selector).ok_or_else(|| ScrapeError::MissingElement {
            url: url.to_string(),
            selector: name,
        })
    }
}

impl Site for LoveCrafts {
    fn name(&self) -> &'static str {
        "lovecrafts"
    }

    fn listing_url(&self) -> &str {
        LISTING_URL
    }

    fn needs_browser(&self) -> bool {
        true
    }

    fn listing_ready(&self) -> Option<&'static str> {
        Some(".product-item a")
    }

    fn product_ready(&self) -> Option<&'static str> {
        Some(".product-name")
    }

    fn extract_links(&self, doc: &Html) -> Vec<String> {
        utils::container_links(doc, &PRODUCT_ITEM, &A, LISTING_URL)
    }

    fn extract_record(&self, url: &str, doc: &Html) -> Result<RawProductRecord, ScrapeError> {
        Ok(RawProductRecord {
            link: url.to_string(),
            name: Self::required(url, doc, &NAME, ".product-name")?,
            blend: Some(Self::required(url, doc, &BLEND, ".blend-attribute")?),
            weight: Some(Self::required(
                url,
                doc,
                &WEIGHT,
                ".ball_weight_yarn-attribute",
            )?),
            price: Some(Self::required(url, doc, &PRICE, ".price")?),
            length: Some(Self::required(url, doc, &LENGTH, ".yarn_length-attribute")?),
        })
    }
}
