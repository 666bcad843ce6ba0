//! Entity builders for browse tests.

use kaguya_api_models::{
    CoverImage, MediaFormat, MediaSummary, MediaTitle, Page, PersonImage, PersonName, Season,
    VoiceActor,
};

/// A fall TV series with predictable fields.
#[must_use]
pub fn media(id: u64) -> MediaSummary {
    MediaSummary {
        id,
        title: MediaTitle {
            user_preferred: format!("Series {id}"),
            romaji: None,
            native: None,
        },
        cover_image: CoverImage {
            large: format!("https://img.example/media/{id}.jpg"),
            medium: None,
            color: None,
        },
        format: Some(MediaFormat::Tv),
        season: Some(Season::Fall),
        season_year: Some(2024),
        average_score: Some(80),
        genres: Vec::new(),
    }
}

/// A page holding `media(id)` for every id in `ids`.
#[must_use]
pub fn media_page(ids: impl IntoIterator<Item = u64>, page: u32, has_next_page: bool) -> Page<MediaSummary> {
    Page::new(ids.into_iter().map(media).collect(), page, has_next_page)
}

/// A voice actor with a portrait URL derived from the id.
#[must_use]
pub fn voice_actor(id: u64, name: &str) -> VoiceActor {
    VoiceActor {
        id,
        name: PersonName {
            user_preferred: name.to_string(),
            native: None,
        },
        image: PersonImage {
            large: format!("https://img.example/staff/{id}.jpg"),
            medium: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_page_keeps_id_order() {
        let page = media_page([3, 1, 2], 4, true);
        let ids: Vec<u64> = page.data.iter().map(|media| media.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(page.page, 4);
        assert!(page.has_next_page);
    }
}
