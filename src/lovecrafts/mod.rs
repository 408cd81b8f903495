mod site;

pub use site::{LoveCrafts, LISTING_URL};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RawProductRecord, ScrapeError, Site};
    use pretty_assertions::assert_eq;
    use scraper::Html;
    use std::fs;

    const PRODUCT_URL: &str = "https://www.lovecrafts.com/en-us/p/paintbox-yarns-wool-mix-aran";

    #[test]
    fn test_extract_links() {
        let html = fs::read_to_string("tests/htmls/lovecrafts_listing.html").expect("Invalid file path");
        let doc = Html::parse_document(&html);

        assert_eq!(
            LoveCrafts.extract_links(&doc),
            vec![
                "https://www.lovecrafts.com/en-us/p/rowan-pure-wool-superwash-worsted".to_string(),
                "https://www.lovecrafts.com/en-us/p/debbie-bliss-cashmerino-dk".to_string(),
                "https://www.lovecrafts.com/en-us/p/drops-merino-extra-fine".to_string(),
            ]
        );
    }

    #[test]
    fn test_listing_filters_need_a_browser() {
        let url = reqwest::Url::parse(LISTING_URL).expect("Valid listing URL");
        assert_eq!(url.query(), None);
        assert!(url.fragment().unwrap_or_default().contains("fiber_yarns="));
        assert!(LoveCrafts.needs_browser());
    }

    #[test]
    fn test_extract_record() {
        let html = fs::read_to_string("tests/htmls/lovecrafts_product.html").expect("Invalid file path");
        let doc = Html::parse_document(&html);

        let record = LoveCrafts
            .extract_record(PRODUCT_URL, &doc)
            .expect("Complete product page");
        assert_eq!(
            record,
            RawProductRecord {
                link: PRODUCT_URL.to_string(),
                name: "Debbie Bliss\nCashmerino DK".to_string(),
                blend: Some("55% Wool, 33% Acrylic, 12% Cashmere".to_string()),
                weight: Some("1.76oz".to_string()),
                price: Some("$9.49".to_string()),
                length: Some("120yds".to_string()),
            }
        );
    }

    #[test]
    fn test_missing_attribute_is_an_error() {
        let html = r#"<html><body>
            <h1 class="product-name">Mystery Yarn</h1>
            <div class="price">$3.00</div>
        </body></html>"#;
        let doc = Html::parse_document(html);

        let err = LoveCrafts
            .extract_record(PRODUCT_URL, &doc)
            .expect_err("Blend is missing");
        assert!(matches!(
            err,
            ScrapeError::MissingElement {
                selector: ".blend-attribute",
                ..
            }
        ));
    }
}
