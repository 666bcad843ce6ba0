//! Address-bar codec for the browse filter.
//!
//! # Design
//! - Only truthy fields are written; falsy fields are absent, never empty.
//! - Array fields repeat their parameter name (`genres=Action&genres=Drama`).
//! - Reading is fail-soft: anything unparseable falls back to the default.

use std::str::FromStr;

use serde::Serialize;
use tracing::debug;
use url::form_urlencoded;

use crate::features::browse::filters::{BrowseQuery, FilterField, QueryOverrides, dedup};

/// Flat, ordered `(name, value)` pairs of an address query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryMap(Vec<(String, String)>);

impl QueryMap {
    /// Build the truthy-only representation of a filter.
    #[must_use]
    pub fn from_query(query: &BrowseQuery) -> Self {
        let mut pairs = Vec::new();
        for field in FilterField::ALL {
            for token in query.tokens(field) {
                pairs.push((field.param().to_string(), token));
            }
        }
        Self(pairs)
    }

    /// Parse a raw query string, with or without the leading `?`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        Self(
            form_urlencoded::parse(raw.as_bytes())
                .map(|(name, value)| (name.into_owned(), value.into_owned()))
                .collect(),
        )
    }

    /// Append a pair.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Ordered pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// Whether any pair uses `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(key, _)| key == name)
    }

    /// First value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value stored under `name`, in order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the query is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `application/x-www-form-urlencoded` rendering without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.0 {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }

    fn values_for(&self, field: FilterField) -> Vec<&str> {
        let bracketed = format!("{}[]", field.param());
        self.0
            .iter()
            .filter(|(key, _)| key == field.param() || *key == bracketed)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
            .collect()
    }
}

impl BrowseQuery {
    /// Truthy-only address representation.
    #[must_use]
    pub fn to_query_map(&self) -> QueryMap {
        QueryMap::from_query(self)
    }

    /// Rebuild a filter from an address query, defaulting absent or malformed fields.
    #[must_use]
    pub fn from_query_map(map: &QueryMap) -> Self {
        Self::merged_over_defaults(QueryOverrides::from_query_map(map))
    }

    /// Rebuild a filter from a raw query string.
    #[must_use]
    pub fn from_query_str(raw: &str) -> Self {
        Self::from_query_map(&QueryMap::parse(raw))
    }

    /// Rebuild a filter from borrowed pairs.
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut map = QueryMap::default();
        for (name, value) in pairs {
            map.push(name, value);
        }
        Self::from_query_map(&map)
    }

    /// Truthy-only query string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.to_query_map().to_query_string()
    }
}

impl QueryOverrides {
    /// Fields an address query sets explicitly; absent or malformed ones stay `None`.
    #[must_use]
    pub fn from_query_map(map: &QueryMap) -> Self {
        let present = |field: FilterField| !map.values_for(field).is_empty();
        Self {
            keyword: map
                .values_for(FilterField::Keyword)
                .first()
                .map(|value| (*value).to_string()),
            format: first_parsed(map, FilterField::Format),
            genres: present(FilterField::Genres).then(|| all_parsed(map, FilterField::Genres)),
            season: first_parsed(map, FilterField::Season),
            season_year: map
                .values_for(FilterField::SeasonYear)
                .first()
                .and_then(|raw| raw.trim().parse::<u16>().ok())
                .filter(|year| *year != 0),
            tags: present(FilterField::Tags).then(|| {
                map.values_for(FilterField::Tags)
                    .into_iter()
                    .map(ToString::to_string)
                    .collect()
            }),
            sort: first_parsed(map, FilterField::Sort),
            media_type: first_parsed(map, FilterField::Type),
            countries: present(FilterField::Countries)
                .then(|| all_parsed(map, FilterField::Countries)),
        }
    }

    /// Explicit fields of a raw query string.
    #[must_use]
    pub fn from_query_str(raw: &str) -> Self {
        Self::from_query_map(&QueryMap::parse(raw))
    }
}

/// REST path for one page of browse results.
#[must_use]
pub fn build_browse_path(query: &BrowseQuery, page: u32, per_page: u32) -> String {
    let mut map = query.to_query_map();
    map.push("page", page.to_string());
    map.push("perPage", per_page.to_string());
    format!("/v1/browse?{}", map.to_query_string())
}

fn first_parsed<T: FromStr>(map: &QueryMap, field: FilterField) -> Option<T> {
    let values = map.values_for(field);
    let parsed = values.first().and_then(|raw| raw.parse().ok());
    if parsed.is_none() && !values.is_empty() {
        debug!(field = field.param(), value = values[0], "ignoring malformed query value");
    }
    parsed
}

fn all_parsed<T: FromStr + PartialEq>(map: &QueryMap, field: FilterField) -> Vec<T> {
    let mut parsed = Vec::new();
    for raw in map.values_for(field) {
        match raw.parse::<T>() {
            Ok(value) => parsed.push(value),
            Err(_) => debug!(field = field.param(), value = raw, "ignoring malformed query value"),
        }
    }
    dedup(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::browse::filters::FieldUpdate;
    use kaguya_api_models::{Country, Genre, MediaFormat, MediaType, Season, SortOrder};
    use proptest::prelude::*;

    #[test]
    fn default_query_writes_only_mandatory_fields() {
        assert_eq!(
            BrowseQuery::default().to_query_string(),
            "type=anime&season=FALL&sort=average_score"
        );
    }

    #[test]
    fn keyword_is_added_then_removed() {
        let mut query = BrowseQuery::default();
        query.apply(FieldUpdate::Keyword("naruto".into()));
        assert_eq!(
            query.to_query_string(),
            "type=anime&season=FALL&sort=average_score&keyword=naruto"
        );
        query.apply(FieldUpdate::Keyword(String::new()));
        let map = query.to_query_map();
        assert!(!map.contains("keyword"));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn arrays_repeat_their_parameter() {
        let mut query = BrowseQuery::default();
        query.apply(FieldUpdate::Genres(vec![Genre::Action, Genre::SliceOfLife]));
        query.apply(FieldUpdate::Countries(vec![Country::Japan, Country::Taiwan]));
        let map = query.to_query_map();
        assert_eq!(map.get_all("genres"), vec!["Action", "Slice of Life"]);
        assert_eq!(map.get_all("countries"), vec!["JP", "TW"]);
        assert!(map.to_query_string().contains("genres=Slice+of+Life"));
    }

    #[test]
    fn cleared_season_is_omitted_and_reads_back_as_default() {
        let mut query = BrowseQuery::default();
        query.apply(FieldUpdate::Season(None));
        assert!(!query.to_query_map().contains("season"));
        assert_eq!(
            BrowseQuery::from_query_str(&query.to_query_string()).season,
            Some(Season::Fall)
        );
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let query = BrowseQuery::from_query_str(
            "?type=comics&season=AUTUMN&seasonYear=next&sort=&format=VHS&genres=Action&genres=Nope&countries=JP&page=4",
        );
        assert_eq!(query.media_type, MediaType::Anime);
        assert_eq!(query.season, Some(Season::Fall));
        assert_eq!(query.season_year, None);
        assert_eq!(query.sort, SortOrder::AverageScore);
        assert_eq!(query.format, None);
        assert_eq!(query.genres, vec![Genre::Action]);
        assert_eq!(query.countries, vec![Country::Japan]);
    }

    #[test]
    fn bracketed_array_names_are_accepted() {
        let query = BrowseQuery::from_pairs([("tags[]", "Isekai"), ("tags[]", "Time Skip")]);
        assert_eq!(query.tags, vec!["Isekai".to_string(), "Time Skip".to_string()]);
    }

    #[test]
    fn overrides_only_hold_explicit_fields() {
        let overrides = QueryOverrides::from_query_str("sort=trending&genres=Drama&seasonYear=0&format=VHS");
        assert_eq!(overrides.sort, Some(SortOrder::Trending));
        assert_eq!(overrides.genres, Some(vec![Genre::Drama]));
        assert_eq!(overrides.season_year, None);
        assert_eq!(overrides.format, None);
        assert_eq!(overrides.season, None);
        assert_eq!(overrides.keyword, None);

        let query = BrowseQuery::merged_over_defaults(overrides);
        assert_eq!(query.season, Some(Season::Fall));
        assert_eq!(query.media_type, MediaType::Anime);
        assert_eq!(query.sort, SortOrder::Trending);
    }

    #[test]
    fn browse_path_appends_paging() {
        let mut query = BrowseQuery::default();
        query.apply(FieldUpdate::Format(Some(MediaFormat::Movie)));
        assert_eq!(
            build_browse_path(&query, 2, 30),
            "/v1/browse?type=anime&season=FALL&sort=average_score&format=MOVIE&page=2&perPage=30"
        );
    }

    fn arb_query() -> impl Strategy<Value = BrowseQuery> {
        (
            "[a-z ]{0,12}",
            proptest::option::of(proptest::sample::select(MediaFormat::ALL.to_vec())),
            proptest::sample::subsequence(Genre::ALL.to_vec(), 0..4),
            proptest::option::of(proptest::sample::select(Season::ALL.to_vec())),
            proptest::option::of(0u16..2030),
            proptest::collection::vec("[A-Za-z][A-Za-z ]{0,10}", 0..3),
            proptest::sample::select(SortOrder::ALL.to_vec()),
            proptest::sample::select(MediaType::ALL.to_vec()),
            proptest::sample::subsequence(Country::ALL.to_vec(), 0..3),
        )
            .prop_map(
                |(keyword, format, genres, season, season_year, tags, sort, media_type, countries)| {
                    let mut query = BrowseQuery::default();
                    query.apply(FieldUpdate::Keyword(keyword));
                    query.apply(FieldUpdate::Format(format));
                    query.apply(FieldUpdate::Genres(genres));
                    query.apply(FieldUpdate::Season(season));
                    query.apply(FieldUpdate::SeasonYear(season_year));
                    query.apply(FieldUpdate::Tags(tags));
                    query.apply(FieldUpdate::Sort(sort));
                    query.apply(FieldUpdate::Type(media_type));
                    query.apply(FieldUpdate::Countries(countries));
                    query
                },
            )
    }

    proptest! {
        #[test]
        fn address_round_trip_preserves_truthy_fields(query in arb_query()) {
            let parsed = BrowseQuery::from_query_str(&query.to_query_string());
            let defaults = BrowseQuery::default();
            for field in FilterField::ALL {
                if query.is_present(field) {
                    prop_assert_eq!(parsed.tokens(field), query.tokens(field));
                } else {
                    prop_assert_eq!(parsed.tokens(field), defaults.tokens(field));
                }
            }
        }

        #[test]
        fn parsed_addresses_are_stable(query in arb_query()) {
            let first = BrowseQuery::from_query_str(&query.to_query_string());
            let second = BrowseQuery::from_query_str(&first.to_query_string());
            prop_assert_eq!(first, second);
        }
    }
}
