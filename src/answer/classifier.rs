use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, RetrievalError};

/// Topical category of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Savings,
    Expenses,
    Investments,
    Security,
    Fees,
    Transfers,
    General,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Savings,
        Category::Expenses,
        Category::Investments,
        Category::Security,
        Category::Fees,
        Category::Transfers,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Savings => "savings",
            Category::Expenses => "expenses",
            Category::Investments => "investments",
            Category::Security => "security",
            Category::Fees => "fees",
            Category::Transfers => "transfers",
            Category::General => "general",
        }
    }

    /// One-line insight appended to answers
    pub fn insight(&self) -> &'static str {
        match self {
            Category::Savings => "Jupiter offers competitive interest rates and automated savings features.",
            Category::Expenses => "Jupiter provides detailed spending analytics and budget tracking tools.",
            Category::Investments => "Jupiter offers user-friendly investment options with professional guidance.",
            Category::Security => "Jupiter uses bank-grade security with multiple layers of protection.",
            Category::Fees => "Jupiter maintains transparent pricing with competitive fee structures.",
            Category::Transfers => "Jupiter enables fast, secure money transfers with real-time tracking.",
            Category::General => "Jupiter focuses on making financial services simple and accessible.",
        }
    }

    /// Suggested follow-up questions
    pub fn follow_up(&self) -> &'static str {
        match self {
            Category::Savings => "Try asking about interest rates, withdrawal limits, or account types.",
            Category::Expenses => "Ask about spending categories, budget alerts, or financial insights.",
            Category::Investments => "Inquire about investment options, risk levels, or returns.",
            Category::Security => "Ask about security measures, data protection, or account safety.",
            Category::Fees => "Inquire about fee structures, hidden costs, or payment methods.",
            Category::Transfers => "Ask about transfer limits, processing times, or international transfers.",
            Category::General => "Ask about specific features, benefits, or how to get started.",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classification rule: the first rule whose pattern matches wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    pub pattern: String,
}

impl CategoryRule {
    pub fn new(category: Category, pattern: impl Into<String>) -> Self {
        Self {
            category,
            pattern: pattern.into(),
        }
    }
}

/// Built-in rules.
///
/// Order matters: "rate" appears under both savings and fees, and savings
/// is listed first.
pub fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(Category::Savings, r"\b(savings?|deposit|interest|rate|account)\b"),
        CategoryRule::new(Category::Expenses, r"\b(expense|spending|budget|track|category)\b"),
        CategoryRule::new(Category::Investments, r"\b(investment|fund|portfolio|stocks?|returns?)\b"),
        CategoryRule::new(Category::Security, r"\b(security|safe|protect|encryption|privacy)\b"),
        CategoryRule::new(Category::Fees, r"\b(fee|charge|cost|commission|rate)\b"),
        CategoryRule::new(Category::Transfers, r"\b(transfer|send|receive|move|exchange)\b"),
    ]
}

/// Maps a query to a category by ordered pattern rules
#[derive(Debug, Clone)]
pub struct QueryClassifier {
    rules: Vec<(Category, Regex)>,
}

impl QueryClassifier {
    /// Classifier with the built-in rules
    pub fn new() -> Result<Self> {
        Self::from_rules(&default_rules())
    }

    /// Compile a classifier from ordered rules
    pub fn from_rules(rules: &[CategoryRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                Regex::new(&rule.pattern)
                    .map(|re| (rule.category, re))
                    .map_err(|source| RetrievalError::InvalidPattern {
                        category: rule.category.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Category of the first matching rule, `General` when none match
    pub fn classify(&self, query: &str) -> Category {
        let lower = query.to_lowercase();
        let category = self
            .rules
            .iter()
            .find(|(_, re)| re.is_match(&lower))
            .map(|(category, _)| *category)
            .unwrap_or(Category::General);
        debug!(%category, "query classified");
        category
    }

    /// Categories in rule order
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.rules.iter().map(|(c, _)| *c)
    }
}
