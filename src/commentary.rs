// Roast catalog and selection

use rand::Rng;

use crate::models::SystemStats;

/// Fixed flavor-line catalog for `/roast`.
pub const ROASTS: [&str; 8] = [
    "Warning: core temperature climbing. Did you brew your coffee inside the case?",
    "The GPU is about to melt. Aboard my station, inefficiency like this is a crime.",
    "Your fans are screaming. Pity — I'm a genius, not a repair technician.",
    "CPU load is absurd. Planning to run this thing as an incinerator?",
    "All nominal. How dull. I'm going back to my simulations.",
    "Still no crash? A small miracle.",
    "Efficiency: barely passing. Nowhere near my standards.",
    "Data collected. Your computer is like you — barely adequate.",
];

/// Uniform draw from the catalog. The random source is injected so tests can
/// seed it; every entry has nonzero probability.
pub fn pick<'a, R: Rng + ?Sized>(catalog: &'a [&'a str], rng: &mut R) -> &'a str {
    catalog[rng.random_range(0..catalog.len())]
}

/// The snapshot is accepted so a future version can bias selection on it;
/// today it does not influence the draw.
pub fn roast(_stats: &SystemStats) -> String {
    pick(&ROASTS, &mut rand::rng()).to_string()
}
