#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Kaguya browse API.
//!
//! The browse UI, the CLI and any server speak the same wire tokens. Every
//! enumeration here owns its token table so the address bar, the REST query
//! and the JSON bodies never drift apart.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Raised when a wire token does not name a known enumeration value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} token `{value}`")]
pub struct UnknownToken {
    /// Enumeration the token was parsed against.
    pub kind: &'static str,
    /// Offending token.
    pub value: String,
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every value in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Stable wire token.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownToken;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($token => Ok(Self::$variant),)+
                    other => Err(UnknownToken {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
                formatter.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Airing season of a title.
    Season, "season" {
        /// January to March.
        Winter => "WINTER",
        /// April to June.
        Spring => "SPRING",
        /// July to September.
        Summer => "SUMMER",
        /// October to December.
        Fall => "FALL",
    }
}

wire_enum! {
    /// Release format of a title.
    MediaFormat, "format" {
        /// Broadcast series.
        Tv => "TV",
        /// Short-episode broadcast series.
        TvShort => "TV_SHORT",
        /// Theatrical release.
        Movie => "MOVIE",
        /// Special episode.
        Special => "SPECIAL",
        /// Original video animation.
        Ova => "OVA",
        /// Original net animation.
        Ona => "ONA",
        /// Music video.
        Music => "MUSIC",
        /// Serialized comic.
        Manga => "MANGA",
        /// Light novel.
        Novel => "NOVEL",
        /// Single-chapter comic.
        OneShot => "ONE_SHOT",
    }
}

wire_enum! {
    /// Kind of catalog being browsed.
    MediaType, "type" {
        /// Animated titles.
        Anime => "anime",
        /// Printed titles.
        Manga => "manga",
    }
}

wire_enum! {
    /// Ordering applied to browse results.
    SortOrder, "sort" {
        /// Highest mean score first.
        AverageScore => "average_score",
        /// Most members first.
        Popularity => "popularity",
        /// Most recent activity first.
        Trending => "trending",
        /// Most favourited first.
        Favourites => "favourites",
        /// Most recently updated first.
        UpdatedAt => "updated_at",
    }
}

wire_enum! {
    /// Country of origin.
    Country, "country" {
        /// Japan.
        Japan => "JP",
        /// South Korea.
        SouthKorea => "KR",
        /// China.
        China => "CN",
        /// Taiwan.
        Taiwan => "TW",
    }
}

wire_enum! {
    /// Genre tag; the token is the display name the catalog uses upstream.
    Genre, "genre" {
        /// Action.
        Action => "Action",
        /// Adventure.
        Adventure => "Adventure",
        /// Comedy.
        Comedy => "Comedy",
        /// Drama.
        Drama => "Drama",
        /// Ecchi.
        Ecchi => "Ecchi",
        /// Fantasy.
        Fantasy => "Fantasy",
        /// Horror.
        Horror => "Horror",
        /// Mahou Shoujo.
        MahouShoujo => "Mahou Shoujo",
        /// Mecha.
        Mecha => "Mecha",
        /// Music.
        Music => "Music",
        /// Mystery.
        Mystery => "Mystery",
        /// Psychological.
        Psychological => "Psychological",
        /// Romance.
        Romance => "Romance",
        /// Science fiction.
        SciFi => "Sci-Fi",
        /// Slice of life.
        SliceOfLife => "Slice of Life",
        /// Sports.
        Sports => "Sports",
        /// Supernatural.
        Supernatural => "Supernatural",
        /// Thriller.
        Thriller => "Thriller",
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<T> {
    /// Entities on this page, in server order.
    pub data: Vec<T>,
    /// One-based page number.
    pub page: u32,
    /// Whether further pages exist.
    #[serde(default)]
    pub has_next_page: bool,
}

impl<T> Page<T> {
    /// Build a page.
    #[must_use]
    pub const fn new(data: Vec<T>, page: u32, has_next_page: bool) -> Self {
        Self {
            data,
            page,
            has_next_page,
        }
    }
}

/// Localised title variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaTitle {
    /// Title in the viewer's preferred language.
    pub user_preferred: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Romanised title.
    pub romaji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Native-script title.
    pub native: Option<String>,
}

/// Cover art at the sizes the list renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoverImage {
    /// Large cover image URL.
    pub large: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Medium cover image URL.
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Dominant colour hint (`#rrggbb`).
    pub color: Option<String>,
}

/// Entity summary rendered by the browse list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaSummary {
    /// Catalog identifier.
    pub id: u64,
    /// Title variants.
    pub title: MediaTitle,
    /// Cover art.
    pub cover_image: CoverImage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Release format.
    pub format: Option<MediaFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Airing season.
    pub season: Option<Season>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Airing year.
    pub season_year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Mean score in the 0-100 range.
    pub average_score: Option<u8>,
    #[serde(default)]
    /// Genres attached to the title.
    pub genres: Vec<Genre>,
}

/// Voice actor name variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonName {
    /// Name in the viewer's preferred language.
    pub user_preferred: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Native-script name.
    pub native: Option<String>,
}

/// Portrait at the sizes the card renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonImage {
    /// Large portrait URL.
    pub large: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Medium portrait URL.
    pub medium: Option<String>,
}

/// Voice actor entity rendered by the card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoiceActor {
    /// Catalog identifier.
    pub id: u64,
    /// Name variants.
    pub name: PersonName,
    /// Portrait.
    pub image: PersonImage,
}

/// RFC9457-compatible problem document surfaced on validation/runtime errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    /// URI reference identifying the problem type.
    pub kind: String,
    /// Short, human-readable summary of the issue.
    pub title: String,
    /// HTTP status code associated with the error.
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Detailed diagnostic message when available.
    pub detail: Option<String>,
}
