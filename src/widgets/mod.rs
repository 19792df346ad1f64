//! Content for the small home-page widgets.

use crate::util::random_index;

pub(crate) const FAVORITE_QUOTES: [&str; 3] = [
    "Many years later, as he faced the firing squad, Colonel Aureliano Buendía was to remember that distant afternoon when his father took him to discover ice.\n—Gabriel García Márquez, One Hundred Years of Solitude",
    "Hope is a dangerous thing. Hope can drive a man insane.\n—The Shawshank Redemption",
    "Bran thought about it. \"Can a man still be brave if he's afraid?\" \"That is the only time a man can be brave,\" his father told him.\n—George R.R. Martin, A Game of Thrones",
];

/// Facts that also appear in one of the home-page sections, keyed by section id.
/// The home page renders these same strings. The wording is placeholder copy.
pub(crate) const SECTION_FUN_FACTS: [(&str, &str); 2] = [
    ("fun-fact-sister", "I have a younger sister who beats me at every board game we own."),
    ("fun-fact-selfie", "I take far more photos of food than selfies."),
];

pub(crate) const FUN_FACTS: [&str; 3] = [
    "I'm a fan of collections. I collect postcards, stickers, books, snacks, etc.",
    "My English name is Heidi. Many people can't pronounce that.",
    "Funny enough that most of my Chinese friends call me by my English name while my American friends call me by my Chinese name.",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FunFact {
    /// Shown alongside the id of the section it came from.
    Section { id: &'static str, text: &'static str },
    Plain(&'static str),
}

impl FunFact {
    pub fn text(&self) -> &'static str {
        match self {
            FunFact::Section { text, .. } => *text,
            FunFact::Plain(text) => *text,
        }
    }
}

pub(crate) fn fun_fact_count() -> usize {
    SECTION_FUN_FACTS.len() + FUN_FACTS.len()
}

/// Index into the union of section facts followed by plain facts.
pub(crate) fn fun_fact_at(index: usize) -> Option<FunFact> {
    match SECTION_FUN_FACTS.get(index) {
        Some(&(id, text)) => Some(FunFact::Section { id, text }),
        None => FUN_FACTS
            .get(index - SECTION_FUN_FACTS.len())
            .copied()
            .map(FunFact::Plain),
    }
}

pub(crate) fn random_quote() -> Option<&'static str> {
    random_index(FAVORITE_QUOTES.len()).map(|i| FAVORITE_QUOTES[i])
}

pub(crate) fn random_fun_fact() -> Option<FunFact> {
    random_index(fun_fact_count()).and_then(fun_fact_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fun_fact_indices_cover_both_lists() {
        assert_eq!(fun_fact_count(), 5);
        assert_eq!(
            fun_fact_at(0),
            Some(FunFact::Section {
                id: "fun-fact-sister",
                text: SECTION_FUN_FACTS[0].1
            })
        );
        assert_eq!(fun_fact_at(2), Some(FunFact::Plain(FUN_FACTS[0])));
        assert_eq!(fun_fact_at(4), Some(FunFact::Plain(FUN_FACTS[2])));
        assert_eq!(fun_fact_at(5), None);
    }

    #[test]
    fn section_facts_keep_their_section_ids() {
        for (i, (id, text)) in SECTION_FUN_FACTS.into_iter().enumerate() {
            assert_eq!(fun_fact_at(i), Some(FunFact::Section { id, text }));
            assert!(id.starts_with("fun-fact-"));
        }
    }

    #[test]
    fn every_fact_has_text() {
        for i in 0..fun_fact_count() {
            let fact = fun_fact_at(i).expect("fact in range");
            assert!(!fact.text().is_empty());
        }
    }
}
