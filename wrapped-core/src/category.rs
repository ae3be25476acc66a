//! Spend categories and the keyword categorizer.
//!
//! Rules are an ordered table: the first rule whose keyword appears in the
//! lowercased name wins, so "chicken salad" is Meat before it is Produce.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Spend category assigned to a line item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Meat")]
    Meat,
    #[serde(rename = "Seafood")]
    Seafood,
    #[serde(rename = "Dairy")]
    Dairy,
    #[serde(rename = "Bakery")]
    Bakery,
    #[serde(rename = "Alcohol")]
    Alcohol,
    #[serde(rename = "Produce")]
    Produce,
    #[serde(rename = "Snacks")]
    Snacks,
    #[serde(rename = "Supplements")]
    Supplements,
    #[serde(rename = "KS Essentials")]
    KsEssentials,
    #[serde(rename = "Miscellaneous")]
    Miscellaneous,
}

impl Category {
    /// Display label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            Category::Meat => "Meat",
            Category::Seafood => "Seafood",
            Category::Dairy => "Dairy",
            Category::Bakery => "Bakery",
            Category::Alcohol => "Alcohol",
            Category::Produce => "Produce",
            Category::Snacks => "Snacks",
            Category::Supplements => "Supplements",
            Category::KsEssentials => "KS Essentials",
            Category::Miscellaneous => "Miscellaneous",
        }
    }

    /// True for the catch-all category
    pub fn is_catch_all(&self) -> bool {
        matches!(self, Category::Miscellaneous)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One categorizer rule: any keyword match assigns the category
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: &'static [&'static str],
}

impl CategoryRule {
    /// `lowered` must already be lowercase
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Ordered rule table. Order is significant.
pub const RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Meat,
        keywords: &["chicken", "beef", "pork"],
    },
    CategoryRule {
        category: Category::Seafood,
        keywords: &["salmon", "shrimp", "fish"],
    },
    CategoryRule {
        category: Category::Dairy,
        keywords: &["milk", "cheese", "yogurt"],
    },
    CategoryRule {
        category: Category::Bakery,
        keywords: &["bread", "roll", "bagel"],
    },
    CategoryRule {
        category: Category::Alcohol,
        keywords: &["wine", "beer", "vodka"],
    },
    CategoryRule {
        category: Category::Produce,
        keywords: &[
            "apple", "banana", "berry", "fruit", "lettuce", "salad", "veggie", "vegetable",
        ],
    },
    CategoryRule {
        category: Category::Snacks,
        keywords: &["snack", "chips", "cracker"],
    },
    CategoryRule {
        category: Category::Supplements,
        keywords: &["vitamin", "supplement"],
    },
    CategoryRule {
        category: Category::KsEssentials,
        keywords: &["kirkland"],
    },
];

/// Categorize an item name. Case-insensitive, first matching rule wins,
/// Miscellaneous when nothing matches.
pub fn categorize(name: &str) -> Category {
    categorize_with(RULES, name)
}

/// Categorize against a caller-supplied rule table
pub fn categorize_with(rules: &[CategoryRule], name: &str) -> Category {
    let lowered = name.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.category)
        .unwrap_or(Category::Miscellaneous)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meat_precedes_produce() {
        assert_eq!(categorize("Chicken Caesar Salad"), Category::Meat);
        assert_eq!(categorize("CAESAR SALAD KIT"), Category::Produce);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(categorize("ORGANIC BANANA"), Category::Produce);
        assert_eq!(categorize("ks atlantic SALMON"), Category::Seafood);
        assert_eq!(categorize("Greek Yogurt"), Category::Dairy);
    }

    #[test]
    fn test_each_rule() {
        assert_eq!(categorize("PORK LOIN"), Category::Meat);
        assert_eq!(categorize("SHRIMP TRAY"), Category::Seafood);
        assert_eq!(categorize("CHEESE BLEND"), Category::Dairy);
        assert_eq!(categorize("DINNER ROLLS"), Category::Bakery);
        assert_eq!(categorize("IPA BEER 24PK"), Category::Alcohol);
        assert_eq!(categorize("FROZEN VEGGIE MIX"), Category::Produce);
        assert_eq!(categorize("TORTILLA CHIPS"), Category::Snacks);
        assert_eq!(categorize("VITAMIN D3"), Category::Supplements);
        assert_eq!(categorize("KIRKLAND PAPER TOWEL"), Category::KsEssentials);
        assert_eq!(categorize("GAS"), Category::Miscellaneous);
    }

    #[test]
    fn test_substring_quirks_follow_table_order() {
        // "roll" hits Bakery before the kirkland rule is reached
        assert_eq!(categorize("KIRKLAND TOILET ROLL"), Category::Bakery);
        // "apple" inside pineapple still counts as produce
        assert_eq!(categorize("PINEAPPLE"), Category::Produce);
        assert_eq!(categorize(""), Category::Miscellaneous);
    }

    #[test]
    fn test_custom_rules() {
        let rules = [CategoryRule {
            category: Category::Snacks,
            keywords: &["jerky"],
        }];
        assert_eq!(categorize_with(&rules, "Beef Jerky"), Category::Snacks);
        assert_eq!(categorize_with(&rules, "Beef"), Category::Miscellaneous);
    }

    #[test]
    fn test_labels_match_serde() {
        let json = serde_json::to_string(&Category::KsEssentials).unwrap();
        assert_eq!(json, "\"KS Essentials\"");
        assert_eq!(Category::KsEssentials.to_string(), "KS Essentials");
        assert!(Category::Miscellaneous.is_catch_all());
        assert!(!Category::Meat.is_catch_all());
    }
}
