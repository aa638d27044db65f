/*!
 * Seed-data factory for translation records.
 *
 * Generates plausible random records for local development and load-shaped
 * tests: a random 10-character key, a locale and context drawn from fixed
 * pools, and a short lorem-style sentence as the value.
 */

use rand::distr::{Alphanumeric, SampleString};
use rand::seq::IndexedRandom;
use rand::Rng;

/// Locale pool used for generated records
pub const SEED_LOCALES: [&str; 5] = ["en", "fr", "es", "de", "ar"];

/// Context pool used for generated records
pub const SEED_CONTEXTS: [&str; 3] = ["web", "mobile", "desktop"];

/// Word pool for generated values
const WORDS: [&str; 24] = [
    "quia", "vero", "atque", "autem", "natus", "facere", "soluta", "dolor",
    "omnis", "rerum", "tempora", "magni", "illum", "fugit", "velit", "porro",
    "sequi", "culpa", "nobis", "animi", "totam", "iusto", "earum", "modi",
];

/// A generated record ready to be written through the upsert path
#[derive(Debug, Clone)]
pub struct SeedRecord {
    pub key: String,
    pub locale: String,
    pub value: String,
    pub context: String,
}

impl SeedRecord {
    /// Generate a random record
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            key: random_key(rng),
            locale: random_choice(rng, &SEED_LOCALES),
            value: random_sentence(rng),
            context: random_choice(rng, &SEED_CONTEXTS),
        }
    }
}

/// Generate a random 10-character alphanumeric key
fn random_key<R: Rng + ?Sized>(rng: &mut R) -> String {
    Alphanumeric.sample_string(rng, 10)
}

/// Generate a short sentence of 4 to 8 pool words, capitalized and
/// terminated with a period
fn random_sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let word_count = rng.random_range(4..=8);
    let mut words = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        words.push(random_choice(rng, &WORDS));
    }

    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    sentence.push('.');

    sentence
}

fn random_choice<R: Rng + ?Sized>(rng: &mut R, pool: &[&str]) -> String {
    pool.choose(rng)
        .copied()
        .unwrap_or(pool[0])
        .to_string()
}
