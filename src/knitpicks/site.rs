use crate::{utils, RawProductRecord, ScrapeError, Site};
use lazy_static::lazy_static;
use scraper::{Html, Selector};

pub const LISTING_URL: &str = concat!(
    "https://www.knitpicks.com/3001/filter-products?",
    "Color=Whites%20%26%20Off-Whites&Fiber-Content=Alpaca%2C",
    "Cashmere%2CCotton%2CLinen%2CMerino%2CMohair%2CNatural%2CSilk%2CWool",
    "&Yarn-Weight=DK&ROBOTS=NO"
);

const FIBER_CONTENT: &str = "Fiber Content";
const GRAMS: &str = "Grams";
const YARDS: &str = "Yards";

const E: &str = "Invalid selector";
lazy_static! {
    static ref CATEGORY_ITEM: Selector = Selector::parse(".category-item").expect(E);
    static ref A: Selector = Selector::parse("a").expect(E);
    static ref TITLE: Selector = Selector::parse(".product-title").expect(E);
    static ref DETAILS: Selector = Selector::parse(".details-display").expect(E);
    static ref PRICE: Selector = Selector::parse(".price").expect(E);
}

#[derive(Debug)]
pub struct KnitPicks;

impl Site for KnitPicks {
    fn name(&self) -> &'static str {
        "knitpicks"
    }

    fn listing_url(&self) -> &str {
        LISTING_URL
    }

    fn listing_ready(&self) -> Option<&'static str> {
        Some(".category-item a")
    }

    fn product_ready(&self) -> Option<&'static str> {
        Some(".details-display")
    }

    fn extract_links(&self, doc: &Html) -> Vec<String> {
        utils::container_links(doc, &CATEGORY_ITEM, &A, LISTING_URL)
    }

    fn extract_record(&self, url: &str, doc: &Html) -> Result<RawProductRecord, ScrapeError> {
        let missing = |selector: &'static str| ScrapeError::MissingElement {
            url: url.to_string(),
            selector,
        };

        let name = utils::first_text(doc, &TITLE).ok_or_else(|| missing(".product-title"))?;
        let details = utils::first_text(doc, &DETAILS).ok_or_else(|| missing(".details-display"))?;
        let price = utils::first_text(doc, &PRICE).ok_or_else(|| missing(".price"))?;

        let details = utils::key_values(&details);
        let detail = |key: &str| {
            details
                .iter()
                .rev()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        };

        Ok(RawProductRecord {
            link: url.to_string(),
            name,
            blend: detail(FIBER_CONTENT),
            weight: detail(GRAMS),
            price: Some(price),
            length: detail(YARDS),
        })
    }
}
