//! Option catalogs backing the browse selectors.

use kaguya_api_models::{Country, Genre, MediaFormat, MediaType, Season, SortOrder};

use crate::core::settings::EARLIEST_SEASON_YEAR;
use crate::i18n::TranslationBundle;

/// Tag vocabulary offered by the tag selector. Labels equal values.
pub const TAGS: &[&str] = &[
    "Achromatic",
    "Amnesia",
    "Anthology",
    "Athletics",
    "Boarding School",
    "Bullying",
    "Cyberpunk",
    "Dystopian",
    "Ensemble Cast",
    "Female Protagonist",
    "Found Family",
    "Gore",
    "Historical",
    "Idol",
    "Isekai",
    "Iyashikei",
    "Magic",
    "Male Protagonist",
    "Martial Arts",
    "Military",
    "Ninja",
    "Office Lady",
    "Post-Apocalyptic",
    "Reincarnation",
    "Revenge",
    "Samurai",
    "School",
    "Shounen",
    "Space",
    "Super Power",
    "Survival",
    "Time Manipulation",
    "Time Skip",
    "Tragedy",
    "Vampire",
    "Video Games",
    "Work",
    "Yandere",
];

/// Label namespace passed to a [`LabelConverter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelCategory {
    /// Genre names.
    Genre,
    /// Airing seasons.
    Season,
    /// Release formats.
    Format,
    /// Catalog kinds.
    Type,
    /// Countries of origin.
    Country,
    /// Sort orders.
    Sort,
}

impl LabelCategory {
    /// Section name in the locale bundle.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Genre => "genre",
            Self::Season => "season",
            Self::Format => "format",
            Self::Type => "type",
            Self::Country => "country",
            Self::Sort => "sort",
        }
    }
}

/// Turns a wire token into a display label.
pub trait LabelConverter {
    /// Label for `value` within `category`.
    fn convert(&self, value: &str, category: LabelCategory) -> String;
}

impl LabelConverter for TranslationBundle {
    fn convert(&self, value: &str, category: LabelCategory) -> String {
        self.text(&format!("{}.{value}", category.key()), value)
    }
}

/// One selector entry: wire token plus display label.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectOption {
    /// Wire token submitted by the control.
    pub value: String,
    /// Localized label.
    pub label: String,
}

impl SelectOption {
    /// Entry whose label is its value.
    #[must_use]
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

fn labelled<'a>(
    tokens: impl IntoIterator<Item = &'a str>,
    category: LabelCategory,
    converter: &dyn LabelConverter,
) -> Vec<SelectOption> {
    tokens
        .into_iter()
        .map(|value| SelectOption {
            value: value.to_string(),
            label: converter.convert(value, category),
        })
        .collect()
}

/// Genre options.
#[must_use]
pub fn genre_options(converter: &dyn LabelConverter) -> Vec<SelectOption> {
    labelled(Genre::ALL.iter().map(|genre| genre.as_str()), LabelCategory::Genre, converter)
}

/// Season options.
#[must_use]
pub fn season_options(converter: &dyn LabelConverter) -> Vec<SelectOption> {
    labelled(Season::ALL.iter().map(|season| season.as_str()), LabelCategory::Season, converter)
}

/// Format options.
#[must_use]
pub fn format_options(converter: &dyn LabelConverter) -> Vec<SelectOption> {
    labelled(MediaFormat::ALL.iter().map(|format| format.as_str()), LabelCategory::Format, converter)
}

/// Catalog kind options.
#[must_use]
pub fn type_options(converter: &dyn LabelConverter) -> Vec<SelectOption> {
    labelled(MediaType::ALL.iter().map(|kind| kind.as_str()), LabelCategory::Type, converter)
}

/// Country options.
#[must_use]
pub fn country_options(converter: &dyn LabelConverter) -> Vec<SelectOption> {
    labelled(Country::ALL.iter().map(|country| country.as_str()), LabelCategory::Country, converter)
}

/// Sort options.
#[must_use]
pub fn sort_options(converter: &dyn LabelConverter) -> Vec<SelectOption> {
    labelled(SortOrder::ALL.iter().map(|sort| sort.as_str()), LabelCategory::Sort, converter)
}

/// Year options from `latest` down to the earliest supported year.
#[must_use]
pub fn season_year_options(latest: u16) -> Vec<SelectOption> {
    (EARLIEST_SEASON_YEAR..=latest)
        .rev()
        .map(|year| SelectOption::plain(year.to_string()))
        .collect()
}

/// Tag options.
#[must_use]
pub fn tag_options() -> Vec<SelectOption> {
    TAGS.iter().map(|tag| SelectOption::plain(*tag)).collect()
}

/// Every catalog the browse form renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowseCatalogs {
    /// Genre selector entries.
    pub genres: Vec<SelectOption>,
    /// Season selector entries.
    pub seasons: Vec<SelectOption>,
    /// Year selector entries.
    pub season_years: Vec<SelectOption>,
    /// Format selector entries.
    pub formats: Vec<SelectOption>,
    /// Tag selector entries.
    pub tags: Vec<SelectOption>,
    /// Catalog kind selector entries.
    pub types: Vec<SelectOption>,
    /// Country selector entries.
    pub countries: Vec<SelectOption>,
    /// Sort selector entries.
    pub sorts: Vec<SelectOption>,
}

impl BrowseCatalogs {
    /// Build every catalog once for a locale.
    #[must_use]
    pub fn build(converter: &dyn LabelConverter, latest_season_year: u16) -> Self {
        Self {
            genres: genre_options(converter),
            seasons: season_options(converter),
            season_years: season_year_options(latest_season_year),
            formats: format_options(converter),
            tags: tag_options(),
            types: type_options(converter),
            countries: country_options(converter),
            sorts: sort_options(converter),
        }
    }
}
