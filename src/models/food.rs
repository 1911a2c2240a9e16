//! Dish models and menu filters

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Dish attributes, used for both create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbohydrates: f64,
    pub allergen: bool,
    /// Free-text note
    pub other: Option<String>,
    pub price: f64,
    pub rating: i64,
    /// Avatar reference
    pub avatar: Option<String>,
    /// Category code, e.g. `PROTEIN_PRODUCTS`
    pub category: String,
}

/// How [`DishFilter`] renders its query string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterEncoding {
    /// `tags=..&antitags=..&category=..`, each value form-encoded
    #[default]
    Separate,
    /// `tags={tags}&{antitags}&{category}` with values inserted verbatim
    ///
    /// Historical wire format: antitags and category are not named
    /// parameters and nothing is encoded, so callers pre-encode values.
    Legacy,
}

/// Menu query filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DishFilter {
    pub tags: String,
    pub antitags: String,
    pub category: String,
    pub encoding: FilterEncoding,
}

impl DishFilter {
    pub fn new(
        tags: impl Into<String>,
        antitags: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            tags: tags.into(),
            antitags: antitags.into(),
            category: category.into(),
            encoding: FilterEncoding::Separate,
        }
    }

    pub fn legacy(mut self) -> Self {
        self.encoding = FilterEncoding::Legacy;
        self
    }

    /// Query string including the leading `?`, empty when there is nothing to send
    pub fn to_query(&self) -> String {
        match self.encoding {
            FilterEncoding::Legacy => {
                format!("?tags={}&{}&{}", self.tags, self.antitags, self.category)
            }
            FilterEncoding::Separate => {
                let mut serializer = form_urlencoded::Serializer::new(String::new());
                let mut any = false;
                for (name, value) in [
                    ("tags", &self.tags),
                    ("antitags", &self.antitags),
                    ("category", &self.category),
                ] {
                    if !value.is_empty() {
                        serializer.append_pair(name, value);
                        any = true;
                    }
                }
                if any {
                    format!("?{}", serializer.finish())
                } else {
                    String::new()
                }
            }
        }
    }
}
