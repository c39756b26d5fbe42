use serde::Deserialize;

/// Form fields as submitted by the RSVP page.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: Option<String>,
    pub people: u32,
    #[serde(rename = "food[]", default)]
    pub food: Vec<String>,
    #[serde(rename = "spotify-id")]
    pub spotify_id: Option<String>,
    #[serde(rename = "track-suggestion")]
    pub track_suggestion: Option<String>,
    pub other: Option<String>,
}

/// One row of `wedding_registration`, ready for binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub name: Option<String>,
    pub amount: i32,
    pub food: String,
    pub spotify_id: Option<String>,
    pub track_suggestion: Option<String>,
    pub other: Option<String>,
}

impl Registration {
    /// Food selections are stored comma-joined, in submission order.
    pub fn from_form(form: RegisterForm) -> Result<Self, String> {
        let amount = i32::try_from(form.people)
            .map_err(|_| format!("people count {} out of range", form.people))?;

        Ok(Self {
            name: form.name,
            amount,
            food: form.food.join(","),
            spotify_id: form.spotify_id,
            track_suggestion: form.track_suggestion,
            other: form.other,
        })
    }
}
