use cfb_api::{Game, SortOrder};
use std::cmp::Ordering;

/// Return a sorted copy. The sort is stable and uses only quarter and clock,
/// so games with equal keys keep their input order.
///
/// Overtime quarters (5+) are plain numbers here: any overtime sorts closer
/// to the end than any regulation quarter.
pub fn sort_games<T: AsRef<Game> + Clone>(games: &[T], order: SortOrder) -> Vec<T> {
    let mut sorted = games.to_vec();
    sorted.sort_by(|a, b| compare(a.as_ref(), b.as_ref(), order));
    sorted
}

fn compare(a: &Game, b: &Game, order: SortOrder) -> Ordering {
    let (qa, ca) = sort_key(a);
    let (qb, cb) = sort_key(b);
    match order {
        SortOrder::ClosestToEnd => qb.cmp(&qa).then(ca.cmp(&cb)),
        SortOrder::MostTimeRemaining => qa.cmp(&qb).then(cb.cmp(&ca)),
    }
}

fn sort_key(game: &Game) -> (u8, u32) {
    (game.quarter.unwrap_or(0), game.seconds_remaining())
}
