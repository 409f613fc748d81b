use rand::Rng;
use rand::seq::IndexedRandom;

/// 從清單中均勻隨機挑選一項，清單為空時回傳 `None`
pub fn pick_one<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    items.choose(rng)
}

/// 在 `[0, duration)` 區間內均勻取樣一個時間點
///
/// `duration` 不是有限正數時回傳 `None`
pub fn random_timestamp<R>(duration: f64, rng: &mut R) -> Option<f64>
where
    R: Rng + ?Sized,
{
    if !duration.is_finite() || duration <= 0.0 {
        return None;
    }
    Some(rng.random_range(0.0..duration))
}
