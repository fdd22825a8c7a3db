use std::cmp::Ordering;

use crate::entities::movie;

/// Orders `movies` best-rated first and numbers them from 1.
///
/// The sort is stable, so ties and unrated movies keep the order they came in
/// with; unrated movies always sort after rated ones. Returns `(id, rank)` for
/// every movie whose stored rank changed.
pub fn assign_ranks(movies: &mut [movie::Model]) -> Vec<(i32, i32)> {
    movies.sort_by(|a, b| by_rating_desc(a.rating, b.rating));

    let mut changed = Vec::new();
    for (position, movie) in movies.iter_mut().enumerate() {
        let rank = position as i32 + 1;
        if movie.ranking != Some(rank) {
            movie.ranking = Some(rank);
            changed.push((movie.id, rank));
        }
    }
    changed
}

fn by_rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
