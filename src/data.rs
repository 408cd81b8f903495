use serde::{Deserialize, Serialize, Serializer};

/// One product exactly as it was scraped.
///
/// Optional fields serialize as `null` so the JSON always carries all six keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProductRecord {
    pub link: String,
    pub name: String,
    pub blend: Option<String>,
    pub weight: Option<String>,
    pub price: Option<String>,
    pub length: Option<String>,
}

impl RawProductRecord {
    /// True when any field holds the empty string. Absent fields don't count.
    pub fn is_incomplete(&self) -> bool {
        self.link.is_empty()
            || self.name.is_empty()
            || [&self.blend, &self.weight, &self.price, &self.length]
                .into_iter()
                .any(|field| field.as_deref() == Some(""))
    }
}

/// A normalized product, one CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedRow {
    pub name: String,
    pub blend: String,
    #[serde(serialize_with = "serialize_weight")]
    pub weight: f64,
    pub price: String,
    pub length: String,
}

impl CleanedRow {
    pub const HEADER: [&'static str; 5] = ["name", "blend", "weight", "price", "length"];
}

/// Shortest round-trip form, whole numbers keep a trailing `.0`.
pub(crate) fn format_weight(weight: f64) -> String {
    if weight.is_finite() && weight.fract() == 0.0 {
        format!("{:.1}", weight)
    } else {
        weight.to_string()
    }
}

fn serialize_weight<S: Serializer>(weight: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_weight(*weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> RawProductRecord {
        RawProductRecord {
            link: "https://example.com/yarn".to_string(),
            name: "Merino DK".to_string(),
            blend: Some("100% Merino".to_string()),
            weight: Some("1.76oz".to_string()),
            price: Some("$7.99".to_string()),
            length: Some("131yds".to_string()),
        }
    }

    #[test]
    fn test_complete_record() {
        assert!(!record().is_incomplete());
    }

    #[test]
    fn test_empty_price_is_incomplete() {
        let r = RawProductRecord {
            price: Some(String::new()),
            ..record()
        };
        assert!(r.is_incomplete());
    }

    #[test]
    fn test_absent_field_is_not_incomplete() {
        let r = RawProductRecord {
            blend: None,
            ..record()
        };
        assert!(!r.is_incomplete());
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let r = RawProductRecord {
            weight: None,
            length: None,
            ..record()
        };
        let json = serde_json::to_string(&r).expect("Serializable record");
        assert_eq!(
            json,
            r#"{"link":"https://example.com/yarn","name":"Merino DK","blend":"100% Merino","weight":null,"price":"$7.99","length":null}"#
        );
    }

    #[test]
    fn test_missing_keys_deserialize_as_none() {
        let r: RawProductRecord =
            serde_json::from_str(r#"{"link":"x","name":"Cotton"}"#).expect("Valid record");
        assert_eq!(r.weight, None);
        assert_eq!(r.blend, None);
    }

    #[test]
    fn test_link_is_required() {
        let res = serde_json::from_str::<RawProductRecord>(r#"{"name":"Cotton","weight":"1oz"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(50.0), "50.0");
        assert_eq!(format_weight(1.76), "1.76");
        assert_eq!(format_weight(0.0), "0.0");
    }

    #[test]
    fn test_format_weight_never_uses_exponents() {
        assert_eq!(format_weight(1e16), "10000000000000000.0");
        assert_eq!(format_weight(1e-5), "0.00001");
    }
}
