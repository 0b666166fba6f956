use rand::Rng;

/// Pick a uniformly random index in `0..len` that differs from `current`.
///
/// Draws are rejected until they move off `current`, so only the immediately
/// preceding item is excluded; anything else may recur later. With a single
/// item the only valid answer is that item. Returns `None` for an empty range.
pub fn pick_next<R: Rng + ?Sized>(len: usize, current: Option<usize>, rng: &mut R) -> Option<usize> {
    match len {
        0 => None,
        1 => Some(0),
        _ => loop {
            let candidate = rng.random_range(0..len);
            if Some(candidate) != current {
                return Some(candidate);
            }
        },
    }
}
