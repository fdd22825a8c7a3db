use serde::Deserialize;

pub const REQUIRED: &str = "This field is required.";

#[derive(Debug, Default, Deserialize)]
pub struct AddMovieForm {
    #[serde(default)]
    pub movie: String,
    #[serde(default)]
    pub csrf_token: String,
}

impl AddMovieForm {
    /// The trimmed title, or the message to show under the field.
    pub fn title(&self) -> Result<&str, &'static str> {
        let title = self.movie.trim();
        if title.is_empty() { Err(REQUIRED) } else { Ok(title) }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EditMovieForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub csrf_token: String,
}

impl EditMovieForm {
    /// Best effort: anything that is not a finite number means "leave it alone".
    pub fn rating(&self) -> Option<f64> {
        parse_rating(&self.rating)
    }
}

pub fn parse_rating(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|r| r.is_finite())
}
