use serde::{Deserialize, Serialize};

/// Body of a Spotify `/v1/search?type=track` response.
#[derive(Debug, Deserialize)]
pub struct SearchTracksResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
pub struct TrackPage {
    pub items: Vec<FoundTrack>,
}

#[derive(Debug, Deserialize)]
pub struct FoundTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub album: TrackAlbum,
}

#[derive(Debug, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TrackAlbum {
    pub images: Vec<AlbumImage>,
}

#[derive(Debug, Deserialize)]
pub struct AlbumImage {
    pub url: String,
    pub height: Option<i32>,
    pub width: Option<i32>,
}

/// What the RSVP page's track picker consumes.
#[derive(Debug, Serialize, PartialEq)]
pub struct TrackResponse {
    pub value: String,
    pub artist: String,
    pub title: String,
    pub image: String,
    pub label: String,
}

impl TrackResponse {
    /// Picks the first artist and the third album image (the smallest
    /// resolution Spotify serves).
    pub fn from_track(track: &FoundTrack) -> Result<Self, String> {
        let artist = track
            .artists
            .first()
            .ok_or_else(|| format!("track {} has no artists", track.id))?;
        let image = track
            .album
            .images
            .get(2)
            .ok_or_else(|| format!("track {} has fewer than 3 album images", track.id))?;

        Ok(Self {
            value: track.id.clone(),
            artist: artist.name.clone(),
            title: track.name.clone(),
            image: image.url.clone(),
            label: format!("{} - {}", artist.name, track.name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spotify_track(artists: &[&str], image_count: usize) -> FoundTrack {
        let images: Vec<_> = (0..image_count)
            .map(|i| {
                json!({
                    "url": format!("https://i.scdn.co/image/{}", i),
                    "height": 640 / (i as i32 + 1),
                    "width": 640 / (i as i32 + 1),
                })
            })
            .collect();
        let artists: Vec<_> = artists.iter().map(|a| json!({ "name": a })).collect();

        serde_json::from_value(json!({
            "id": "3GBnRAmJGhCcHLGRI8sDPw",
            "name": "Imagine",
            "artists": artists,
            "album": { "images": images },
        }))
        .unwrap()
    }

    #[test]
    fn maps_first_artist_and_third_image() {
        let response = TrackResponse::from_track(&spotify_track(&["John Lennon", "Other"], 3)).unwrap();
        assert_eq!(
            response,
            TrackResponse {
                value: "3GBnRAmJGhCcHLGRI8sDPw".to_string(),
                artist: "John Lennon".to_string(),
                title: "Imagine".to_string(),
                image: "https://i.scdn.co/image/2".to_string(),
                label: "John Lennon - Imagine".to_string(),
            }
        );
    }

    #[test]
    fn fewer_than_three_images_is_an_error() {
        let err = TrackResponse::from_track(&spotify_track(&["John Lennon"], 2)).unwrap_err();
        assert!(err.contains("fewer than 3 album images"));
    }

    #[test]
    fn track_without_artists_is_an_error() {
        let err = TrackResponse::from_track(&spotify_track(&[], 3)).unwrap_err();
        assert!(err.contains("no artists"));
    }

    #[test]
    fn parses_search_response_page() {
        let page: SearchTracksResponse = serde_json::from_value(json!({
            "tracks": {
                "href": "https://api.spotify.com/v1/search?query=imagine&type=track&offset=0&limit=5",
                "limit": 5,
                "offset": 0,
                "total": 812,
                "items": [{
                    "id": "3GBnRAmJGhCcHLGRI8sDPw",
                    "name": "Imagine",
                    "artists": [{ "name": "John Lennon" }],
                    "album": {
                        "images": [
                            { "url": "https://i.scdn.co/image/0", "height": 640, "width": 640 },
                            { "url": "https://i.scdn.co/image/1", "height": 300, "width": 300 },
                            { "url": "https://i.scdn.co/image/2", "height": 64, "width": 64 }
                        ]
                    }
                }]
            }
        }))
        .unwrap();

        assert_eq!(page.tracks.items.len(), 1);
        assert_eq!(page.tracks.items[0].name, "Imagine");
        assert_eq!(page.tracks.items[0].album.images[2].height, Some(64));
        assert_eq!(page.tracks.items[0].album.images[2].width, Some(64));
    }
}
