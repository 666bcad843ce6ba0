//! Browse filter model and typed field updates.
//!
//! # Design
//! - The model is always fully shaped; "empty" means every field holds its default.
//! - Multi-value fields keep selection order but never hold duplicates.
//! - Controls emit string tokens; [`FieldUpdate::from_control`] is the only
//!   place tokens become typed values.

use kaguya_api_models::{Country, Genre, MediaFormat, MediaType, Season, SortOrder, UnknownToken};
use thiserror::Error;

/// Every editable field of the browse filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// Free-text search.
    Keyword,
    /// Release format.
    Format,
    /// Genre set.
    Genres,
    /// Airing season.
    Season,
    /// Airing year.
    SeasonYear,
    /// Tag set.
    Tags,
    /// Result ordering.
    Sort,
    /// Catalog kind.
    Type,
    /// Country set.
    Countries,
}

impl FilterField {
    /// Every field, in the order query parameters are emitted.
    pub const ALL: [Self; 9] = [
        Self::Type,
        Self::Season,
        Self::Sort,
        Self::Keyword,
        Self::SeasonYear,
        Self::Format,
        Self::Genres,
        Self::Tags,
        Self::Countries,
    ];

    /// Query parameter name.
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Format => "format",
            Self::Genres => "genres",
            Self::Season => "season",
            Self::SeasonYear => "seasonYear",
            Self::Tags => "tags",
            Self::Sort => "sort",
            Self::Type => "type",
            Self::Countries => "countries",
        }
    }

    /// Look a field up by its query parameter name.
    #[must_use]
    pub fn from_param(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.param() == name)
    }

    /// Whether the field holds a set of values.
    #[must_use]
    pub const fn is_multi(self) -> bool {
        matches!(self, Self::Genres | Self::Tags | Self::Countries)
    }
}

/// Failures converting control output into a typed update.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    /// Token is not a member of the field's catalog.
    #[error("invalid value for `{field}`: {source}")]
    UnknownToken {
        /// Query parameter name of the field.
        field: &'static str,
        /// Underlying token error.
        #[source]
        source: UnknownToken,
    },
    /// Year could not be parsed.
    #[error("invalid season year `{value}`")]
    InvalidYear {
        /// Offending input.
        value: String,
    },
    /// A single-value field received several values.
    #[error("`{field}` accepts a single value")]
    TooManyValues {
        /// Query parameter name of the field.
        field: &'static str,
    },
    /// The field cannot be cleared.
    #[error("`{field}` cannot be cleared")]
    Required {
        /// Query parameter name of the field.
        field: &'static str,
    },
}

/// Filter state for the browse list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BrowseQuery {
    /// Free-text search.
    pub keyword: String,
    /// Optional release format.
    pub format: Option<MediaFormat>,
    /// Selected genres.
    pub genres: Vec<Genre>,
    /// Optional airing season.
    pub season: Option<Season>,
    /// Optional airing year.
    pub season_year: Option<u16>,
    /// Selected tags.
    pub tags: Vec<String>,
    /// Result ordering.
    pub sort: SortOrder,
    /// Catalog kind; never cleared.
    pub media_type: MediaType,
    /// Selected countries of origin.
    pub countries: Vec<Country>,
}

impl Default for BrowseQuery {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            format: None,
            genres: Vec::new(),
            season: Some(Season::Fall),
            season_year: None,
            tags: Vec::new(),
            sort: SortOrder::AverageScore,
            media_type: MediaType::Anime,
            countries: Vec::new(),
        }
    }
}

/// Partially specified defaults, e.g. from a deep link or a preset page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryOverrides {
    /// Keyword override.
    pub keyword: Option<String>,
    /// Format override.
    pub format: Option<MediaFormat>,
    /// Genre override.
    pub genres: Option<Vec<Genre>>,
    /// Season override.
    pub season: Option<Season>,
    /// Year override.
    pub season_year: Option<u16>,
    /// Tag override.
    pub tags: Option<Vec<String>>,
    /// Sort override.
    pub sort: Option<SortOrder>,
    /// Catalog kind override.
    pub media_type: Option<MediaType>,
    /// Country override.
    pub countries: Option<Vec<Country>>,
}

impl BrowseQuery {
    /// Merge caller-supplied defaults over the global defaults, field by field.
    #[must_use]
    pub fn merged_over_defaults(overrides: QueryOverrides) -> Self {
        let base = Self::default();
        Self {
            keyword: overrides.keyword.unwrap_or(base.keyword),
            format: overrides.format.or(base.format),
            genres: overrides.genres.map_or(base.genres, dedup),
            season: overrides.season.or(base.season),
            season_year: overrides.season_year.or(base.season_year),
            tags: overrides.tags.map_or(base.tags, dedup),
            sort: overrides.sort.unwrap_or(base.sort),
            media_type: overrides.media_type.unwrap_or(base.media_type),
            countries: overrides.countries.map_or(base.countries, dedup),
        }
    }

    /// Whether `field` holds a truthy value and belongs in the address.
    #[must_use]
    pub fn is_present(&self, field: FilterField) -> bool {
        match field {
            FilterField::Keyword => !self.keyword.is_empty(),
            FilterField::Format => self.format.is_some(),
            FilterField::Genres => !self.genres.is_empty(),
            FilterField::Season => self.season.is_some(),
            FilterField::SeasonYear => self.season_year.is_some_and(|year| year != 0),
            FilterField::Tags => !self.tags.is_empty(),
            FilterField::Countries => !self.countries.is_empty(),
            FilterField::Sort | FilterField::Type => true,
        }
    }

    /// Wire tokens for `field`; empty when the field is falsy.
    #[must_use]
    pub fn tokens(&self, field: FilterField) -> Vec<String> {
        if !self.is_present(field) {
            return Vec::new();
        }
        match field {
            FilterField::Keyword => vec![self.keyword.clone()],
            FilterField::Format => self.format.iter().map(ToString::to_string).collect(),
            FilterField::Genres => self.genres.iter().map(ToString::to_string).collect(),
            FilterField::Season => self.season.iter().map(ToString::to_string).collect(),
            FilterField::SeasonYear => self.season_year.iter().map(ToString::to_string).collect(),
            FilterField::Tags => self.tags.clone(),
            FilterField::Sort => vec![self.sort.to_string()],
            FilterField::Type => vec![self.media_type.to_string()],
            FilterField::Countries => self.countries.iter().map(ToString::to_string).collect(),
        }
    }

    /// Apply an update, returning whether the model changed.
    pub fn apply(&mut self, update: FieldUpdate) -> bool {
        let before = self.clone();
        match update {
            FieldUpdate::Keyword(keyword) => self.keyword = keyword,
            FieldUpdate::Format(format) => self.format = format,
            FieldUpdate::Genres(genres) => self.genres = dedup(genres),
            FieldUpdate::Season(season) => self.season = season,
            FieldUpdate::SeasonYear(year) => self.season_year = year,
            FieldUpdate::Tags(tags) => {
                self.tags = dedup(tags.into_iter().filter(|tag| !tag.is_empty()).collect());
            }
            FieldUpdate::Sort(sort) => self.sort = sort,
            FieldUpdate::Type(media_type) => self.media_type = media_type,
            FieldUpdate::Countries(countries) => self.countries = dedup(countries),
        }
        *self != before
    }
}

/// Typed replacement value for one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Replace the keyword.
    Keyword(String),
    /// Replace or clear the format.
    Format(Option<MediaFormat>),
    /// Replace the genre set.
    Genres(Vec<Genre>),
    /// Replace or clear the season.
    Season(Option<Season>),
    /// Replace or clear the year.
    SeasonYear(Option<u16>),
    /// Replace the tag set.
    Tags(Vec<String>),
    /// Replace the ordering.
    Sort(SortOrder),
    /// Replace the catalog kind.
    Type(MediaType),
    /// Replace the country set.
    Countries(Vec<Country>),
}

impl FieldUpdate {
    /// Field this update targets.
    #[must_use]
    pub const fn field(&self) -> FilterField {
        match self {
            Self::Keyword(_) => FilterField::Keyword,
            Self::Format(_) => FilterField::Format,
            Self::Genres(_) => FilterField::Genres,
            Self::Season(_) => FilterField::Season,
            Self::SeasonYear(_) => FilterField::SeasonYear,
            Self::Tags(_) => FilterField::Tags,
            Self::Sort(_) => FilterField::Sort,
            Self::Type(_) => FilterField::Type,
            Self::Countries(_) => FilterField::Countries,
        }
    }

    /// Convert the tokens a select control emits into a typed update.
    ///
    /// An empty slice clears optional fields and empties sets. Blank tokens are
    /// ignored, matching a cleared select.
    ///
    /// # Errors
    /// Returns [`FieldError`] for unknown tokens, unparseable years, several
    /// values on a single-value field, or an attempt to clear a required field.
    pub fn from_control(field: FilterField, tokens: &[String]) -> Result<Self, FieldError> {
        let tokens: Vec<&str> = tokens
            .iter()
            .map(String::as_str)
            .filter(|token| !token.is_empty())
            .collect();
        let param = field.param();
        let single = || single_token(&tokens, param);
        let token_err = |source| FieldError::UnknownToken {
            field: param,
            source,
        };

        Ok(match field {
            FilterField::Keyword => Self::Keyword(tokens.concat()),
            FilterField::Format => {
                Self::Format(single()?.map(str::parse).transpose().map_err(token_err)?)
            }
            FilterField::Season => {
                Self::Season(single()?.map(str::parse).transpose().map_err(token_err)?)
            }
            FilterField::SeasonYear => Self::SeasonYear(
                single()?
                    .map(|raw| {
                        raw.trim().parse::<u16>().map_err(|_| FieldError::InvalidYear {
                            value: raw.to_string(),
                        })
                    })
                    .transpose()?,
            ),
            FilterField::Sort => Self::Sort(
                single()?
                    .ok_or(FieldError::Required { field: param })?
                    .parse()
                    .map_err(token_err)?,
            ),
            FilterField::Type => Self::Type(
                single()?
                    .ok_or(FieldError::Required { field: param })?
                    .parse()
                    .map_err(token_err)?,
            ),
            FilterField::Genres => Self::Genres(
                tokens
                    .iter()
                    .map(|token| token.parse())
                    .collect::<Result<_, _>>()
                    .map_err(token_err)?,
            ),
            FilterField::Countries => Self::Countries(
                tokens
                    .iter()
                    .map(|token| token.parse())
                    .collect::<Result<_, _>>()
                    .map_err(token_err)?,
            ),
            FilterField::Tags => Self::Tags(tokens.iter().map(ToString::to_string).collect()),
        })
    }
}

fn single_token<'a>(tokens: &[&'a str], field: &'static str) -> Result<Option<&'a str>, FieldError> {
    match tokens {
        [] => Ok(None),
        [one] => Ok(Some(*one)),
        _ => Err(FieldError::TooManyValues { field }),
    }
}

pub(crate) fn dedup<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}
