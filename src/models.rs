use crate::catalog::{CatalogError, MovieDetails};

/// A movie about to be inserted, built from the catalog's details.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub id: i32,
    pub title: String,
    pub image_url: String,
    pub year: i32,
    pub description: String,
}

impl NewMovie {
    pub fn from_details(
        id: i32,
        details: MovieDetails,
        image_base_url: &str,
    ) -> Result<Self, CatalogError> {
        let year = release_year(&details.release_date).ok_or_else(|| {
            CatalogError::Malformed(format!(
                "movie {id} has no usable release date ({:?})",
                details.release_date
            ))
        })?;

        let poster_path = details
            .poster_path
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| CatalogError::Malformed(format!("movie {id} has no poster")))?;

        Ok(Self {
            id,
            title: details.title,
            image_url: format!("{}{}", image_base_url.trim_end_matches('/'), poster_path),
            year,
            description: details.overview,
        })
    }
}

/// `"1999-03-31"` → `1999`.
pub fn release_year(release_date: &str) -> Option<i32> {
    release_date.split('-').next()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> MovieDetails {
        MovieDetails {
            title: "The Matrix".into(),
            overview: "A hacker learns the truth.".into(),
            release_date: "1999-03-31".into(),
            poster_path: Some("/matrix.jpg".into()),
        }
    }

    #[test]
    fn release_year_is_the_leading_segment() {
        assert_eq!(release_year("1999-03-31"), Some(1999));
        assert_eq!(release_year("2024"), Some(2024));
        assert_eq!(release_year(""), None);
        assert_eq!(release_year("soon"), None);
    }

    #[test]
    fn builds_record_from_details() {
        let movie =
            NewMovie::from_details(603, matrix(), "https://image.tmdb.org/t/p/w500").unwrap();

        assert_eq!(
            movie,
            NewMovie {
                id: 603,
                title: "The Matrix".into(),
                image_url: "https://image.tmdb.org/t/p/w500/matrix.jpg".into(),
                year: 1999,
                description: "A hacker learns the truth.".into(),
            }
        );
    }

    #[test]
    fn missing_release_date_or_poster_is_malformed() {
        let mut details = matrix();
        details.release_date = String::new();
        assert!(matches!(
            NewMovie::from_details(603, details, "https://img"),
            Err(CatalogError::Malformed(_))
        ));

        let mut details = matrix();
        details.poster_path = None;
        assert!(matches!(
            NewMovie::from_details(603, details, "https://img"),
            Err(CatalogError::Malformed(_))
        ));
    }
}
