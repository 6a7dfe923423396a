use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Marker OMDb uses for "no value for this field".
pub const NOT_AVAILABLE: &str = "N/A";

pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/300x450?text=No+Poster";

/// Returns the value unless it is empty or the OMDb "N/A" marker.
pub fn available(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() || value == NOT_AVAILABLE {
        None
    } else {
        Some(value)
    }
}

/// Poster URL to show, falling back to the placeholder image.
pub fn poster_or_placeholder(poster: &str) -> &str {
    available(poster).unwrap_or(PLACEHOLDER_POSTER)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Type", default)]
    pub item_type: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

impl SearchResult {
    pub fn poster_url(&self) -> &str {
        poster_or_placeholder(&self.poster)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SearchPage {
    #[serde(rename = "Search", default)]
    pub results: Vec<SearchResult>,
    #[serde(rename = "totalResults", default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct MovieDetail {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub rated: String,
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub director: String,
    pub writer: String,
    pub actors: String,
    pub plot: String,
    pub language: String,
    pub country: String,
    pub awards: String,
    pub poster: String,
    pub ratings: Vec<Rating>,
    pub metascore: String,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: String,
    #[serde(rename = "Type")]
    pub item_type: String,
    #[serde(rename = "DVD")]
    pub dvd: String,
    pub box_office: String,
    pub production: String,
    pub website: String,
}

impl MovieDetail {
    pub fn poster_url(&self) -> &str {
        poster_or_placeholder(&self.poster)
    }
}

/// Outcome of an OMDb lookup: either the record, or the
/// `{"Response":"False","Error":...}` shape with its optional message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound(Option<String>),
}

impl<T: Serialize> Lookup<T> {
    /// Wire form used by OMDb and by our proxy.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        match self {
            Lookup::Found(item) => {
                let mut value = serde_json::to_value(item)?;
                if let Value::Object(ref mut map) = value {
                    map.insert("Response".to_string(), Value::from("True"));
                }
                Ok(value)
            }
            Lookup::NotFound(message) => {
                let mut map = serde_json::Map::new();
                map.insert("Response".to_string(), Value::from("False"));
                if let Some(message) = message {
                    map.insert("Error".to_string(), Value::from(message.as_str()));
                }
                Ok(Value::Object(map))
            }
        }
    }
}

pub fn parse_lookup<T: DeserializeOwned>(body: &str) -> serde_json::Result<Lookup<T>> {
    let value: Value = serde_json::from_str(body)?;

    if value.get("Response").and_then(Value::as_str) == Some("False") {
        let message = value
            .get("Error")
            .and_then(Value::as_str)
            .map(|s| s.to_string());
        return Ok(Lookup::NotFound(message));
    }

    serde_json::from_value(value).map(Lookup::Found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_page() {
        let body = r#"{"Search":[{"imdbID":"tt0372784","Title":"Batman Begins","Year":"2005","Type":"movie","Poster":"N/A"}],"totalResults":"1","Response":"True"}"#;

        let lookup: Lookup<SearchPage> = parse_lookup(body).unwrap();
        let Lookup::Found(page) = lookup else {
            panic!("expected a search page");
        };
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].title, "Batman Begins");
        assert_eq!(page.results[0].poster_url(), PLACEHOLDER_POSTER);
        assert_eq!(page.total_results.as_deref(), Some("1"));
    }

    #[test]
    fn test_parse_response_false() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let lookup: Lookup<SearchPage> = parse_lookup(body).unwrap();
        assert_eq!(lookup, Lookup::NotFound(Some("Movie not found!".to_string())));

        let lookup: Lookup<MovieDetail> = parse_lookup(r#"{"Response":"False"}"#).unwrap();
        assert_eq!(lookup, Lookup::NotFound(None));
    }

    #[test]
    fn test_parse_detail_fields() {
        let body = r#"{"Title":"Heat","Year":"1995","Rated":"R","Runtime":"170 min",
            "Director":"Michael Mann","imdbRating":"8.3","imdbID":"tt0113277",
            "BoxOffice":"N/A","DVD":"N/A","Ratings":[{"Source":"Internet Movie Database","Value":"8.3/10"}],
            "Response":"True"}"#;

        let Lookup::Found(detail) = parse_lookup::<MovieDetail>(body).unwrap() else {
            panic!("expected a movie");
        };
        assert_eq!(detail.imdb_id, "tt0113277");
        assert_eq!(detail.director, "Michael Mann");
        assert_eq!(detail.imdb_rating, "8.3");
        assert_eq!(detail.ratings.len(), 1);
        assert_eq!(available(&detail.box_office), None);
        assert_eq!(detail.plot, "");
    }

    #[test]
    fn test_available() {
        assert_eq!(available("N/A"), None);
        assert_eq!(available("  "), None);
        assert_eq!(available("$1,000"), Some("$1,000"));
        assert_eq!(poster_or_placeholder("http://img/x.jpg"), "http://img/x.jpg");
    }

    #[test]
    fn test_lookup_to_json() {
        let found = Lookup::Found(SearchPage::default()).to_json().unwrap();
        assert_eq!(found["Response"], "True");
        assert!(found["Search"].as_array().unwrap().is_empty());

        let missing: Lookup<SearchPage> = Lookup::NotFound(Some("Too many results.".to_string()));
        let value = missing.to_json().unwrap();
        assert_eq!(value["Response"], "False");
        assert_eq!(value["Error"], "Too many results.");
    }
}
