//! Search query parameters.

/// Raw query string of `GET /places/`
///
/// Built from decoded key/value pairs. A repeated key keeps its last
/// value; unknown keys are ignored.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub name: Option<String>,
    pub min_rating: Option<String>,
}

impl FromIterator<(String, String)> for SearchParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => params.name = Some(value),
                "min_rating" => params.min_rating = Some(value),
                _ => {}
            }
        }
        params
    }
}

/// Interpreted search filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    /// Case-insensitive substring of the place name
    pub name: Option<String>,
    /// Minimum rounded average rating
    pub min_rating: Option<f64>,
}

impl SearchQuery {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            min_rating: None,
        }
    }
}

impl From<SearchParams> for SearchQuery {
    /// Empty values are ignored, as is a `min_rating` that is not a finite
    /// number.
    fn from(params: SearchParams) -> Self {
        let name = params.name.filter(|n| !n.is_empty());
        let min_rating = params
            .min_rating
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite());

        Self { name, min_rating }
    }
}
