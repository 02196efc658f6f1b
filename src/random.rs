use js_sys::{Date, Math};
use rand::rngs::SmallRng;
use rand::SeedableRng;

pub(crate) fn page_rng() -> SmallRng {
    let entropy = (Math::random() * u32::MAX as f64) as u64;
    let clock = Date::now() as u64;
    SmallRng::seed_from_u64(entropy << 32 ^ clock)
}
