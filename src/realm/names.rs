//! Random nation names built from consonant/vowel syllables

use rand::seq::SliceRandom;
use rand::Rng;

const CONSONANTS: &[&str] = &[
    "k", "s", "t", "m", "y", "r", "w", "h", "g", "z", "d", "p", "ch", "sh", "zh",
];
const VOWELS: &[&str] = &["a", "i", "u", "e", "o", "ea"];
const SYLLABLES: usize = 3;

pub fn random_name<R: Rng>(rng: &mut R) -> String {
    let mut name = String::new();
    for _ in 0..SYLLABLES {
        name.push_str(CONSONANTS.choose(rng).copied().unwrap_or("k"));
        name.push_str(VOWELS.choose(rng).copied().unwrap_or("a"));
    }
    capitalize(&name)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
