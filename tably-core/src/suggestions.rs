//! Built-in fallback suggestion lists, grouped by the same categories the
//! suggestion source serves. Substituted whenever the remote fetch fails so
//! the UI never blocks on the provider.

use crate::client::SuggestionCategory;

pub fn fallback_for(category: SuggestionCategory) -> &'static [&'static str] {
    match category {
        SuggestionCategory::General => &[
            "Something quick",
            "Comfort food",
            "Something new",
            "Healthy-ish",
            "Crowd pleaser",
        ],
        SuggestionCategory::Morning => &[
            "Pancakes",
            "Shakshuka",
            "Granola & yogurt",
            "Breakfast burritos",
        ],
        SuggestionCategory::Evening => &[
            "Ramen",
            "Tacos",
            "Pizza night",
            "Stir fry",
            "Curry",
        ],
        SuggestionCategory::Cooking => &[
            "One-pot pasta",
            "Sheet-pan veggies",
            "Homemade dumplings",
            "Slow-cooker chili",
        ],
        SuggestionCategory::DineOut => &[
            "That new place downtown",
            "Old favorite",
            "Street food market",
            "Somewhere with outdoor seating",
        ],
    }
}
