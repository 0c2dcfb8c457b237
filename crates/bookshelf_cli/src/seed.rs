//! Synthetic catalog producer.
//!
//! Generates plausible-looking authors and books for demos and load checks.
//! Deterministic for a fixed seed and reference date.

use bookshelf_core::{AuthorId, NewAuthor, NewBook};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const DAYS_PER_YEAR: u64 = 365;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Chiara", "Dmitri", "Elena", "Farid", "Grace", "Hiro", "Ines", "Jonas",
    "Keiko", "Luis", "Maya", "Nikolai", "Olga", "Pablo", "Quinn", "Rosa", "Sven", "Tomas",
];

const LAST_NAMES: &[&str] = &[
    "Adams", "Bauer", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia", "Horvat", "Ivanova",
    "Jensen", "Kowalski", "Lindqvist", "Moreau", "Novak", "Okafor", "Petrov", "Rossi", "Sato",
    "Tanaka", "Weber",
];

const CITIES: &[&str] = &[
    "Lisbon", "Krakow", "Osaka", "Lagos", "Montreal", "Valparaiso", "Tbilisi", "Bergen",
    "Marseille", "Hanoi", "Cork", "Trieste",
];

const TITLE_WORDS: &[&str] = &[
    "silent", "river", "glass", "empire", "winter", "garden", "shadow", "letters", "northern",
    "machine", "harbor", "ember", "orchard", "atlas", "thread", "lantern", "salt", "echo",
    "summer", "archive",
];

/// Category labels the producer draws from. The catalog itself accepts any label.
pub const CATEGORIES: &[&str] = &[
    "Fiction",
    "Non-fiction",
    "Science Fiction",
    "Fantasy",
    "Biography",
    "History",
];

pub struct FakeCatalog {
    rng: StdRng,
    today: NaiveDate,
}

impl FakeCatalog {
    /// `seed = None` draws from OS entropy.
    pub fn new(seed: Option<u64>, today: NaiveDate) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self { rng, today }
    }

    /// Authors aged 20 to 100, each with a birth place.
    pub fn authors(&mut self, count: usize) -> Vec<NewAuthor> {
        (0..count).map(|_| self.author()).collect()
    }

    /// Books with 1 to 3 distinct authors picked from `author_ids`.
    pub fn books(&mut self, count: usize, author_ids: &[AuthorId]) -> Vec<NewBook> {
        (0..count).map(|_| self.book(author_ids)).collect()
    }

    fn author(&mut self) -> NewAuthor {
        let first_name = self.pick(FIRST_NAMES);
        let last_name = self.pick(LAST_NAMES);
        let days_back = self.rng.gen_range(20 * DAYS_PER_YEAR..=100 * DAYS_PER_YEAR);
        let birth_place = self.pick(CITIES);

        NewAuthor::new(first_name, last_name)
            .with_birth_date(self.days_before_today(days_back))
            .with_birth_place(birth_place)
    }

    fn book(&mut self, author_ids: &[AuthorId]) -> NewBook {
        let title = (0..3)
            .map(|_| self.pick(TITLE_WORDS))
            .collect::<Vec<_>>()
            .join(" ");
        let category = self.pick(CATEGORIES);
        let page_count = self.rng.gen_range(20..=1000);
        let days_back = self.rng.gen_range(0..=100 * DAYS_PER_YEAR);
        let author_count = self.rng.gen_range(1..=3).min(author_ids.len());
        let authors: Vec<AuthorId> = author_ids
            .choose_multiple(&mut self.rng, author_count)
            .copied()
            .collect();

        NewBook::new(capitalize(&title))
            .with_category(category)
            .with_page_count(page_count)
            .with_publish_date(self.days_before_today(days_back))
            .with_authors(authors)
    }

    fn pick(&mut self, values: &[&'static str]) -> &'static str {
        values.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn days_before_today(&self, days: u64) -> NaiveDate {
        self.today
            .checked_sub_days(Days::new(days))
            .unwrap_or(self.today)
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
