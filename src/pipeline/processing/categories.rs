use once_cell::sync::Lazy;
use tracing::{debug, info};

use super::columns::PatternList;
use crate::types::{Gender, Sport};

/// A (sport, gender) pair and the header patterns that indicate it
#[derive(Debug)]
pub struct Category {
    pub sport: Sport,
    pub gender: Gender,
    pub patterns: PatternList,
}

impl Category {
    fn new(sport: Sport, gender: Gender, patterns: &[&str]) -> Self {
        Self {
            sport,
            gender,
            patterns: PatternList::new(patterns),
        }
    }
}

// "men" must not be preceded by "o" so "women" headers never count for the men's side.
pub static CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    vec![
        Category::new(Sport::IndoorTrack, Gender::Men, &[r"(?:^|[^o])men.*indoor.*track", r"indoor.*track.*(?:^|[^o])men"]),
        Category::new(Sport::IndoorTrack, Gender::Women, &[r"women.*indoor.*track", r"indoor.*track.*women"]),
        Category::new(Sport::OutdoorTrack, Gender::Men, &[r"(?:^|[^o])men.*outdoor.*track", r"outdoor.*track.*(?:^|[^o])men"]),
        Category::new(Sport::OutdoorTrack, Gender::Women, &[r"women.*outdoor.*track", r"outdoor.*track.*women"]),
        Category::new(Sport::CrossCountry, Gender::Men, &[r"(?:^|[^o])men.*cross.*country", r"cross.*country.*(?:^|[^o])men"]),
        Category::new(Sport::CrossCountry, Gender::Women, &[r"women.*cross.*country", r"cross.*country.*women"]),
    ]
});

/// A category present in this spreadsheet edition, with every column that signals it
#[derive(Debug, Clone)]
pub struct MatchedCategory<'c> {
    pub category: &'c Category,
    pub columns: Vec<String>,
}

/// Pair each category with its matching columns. Categories without any
/// matching column are dropped; order follows `categories`.
pub fn match_categories<'c>(columns: &[String], categories: &'c [Category]) -> Vec<MatchedCategory<'c>> {
    let mut matched = Vec::new();

    for category in categories {
        let hits: Vec<String> = columns
            .iter()
            .filter(|c| category.patterns.matches_any(c))
            .cloned()
            .collect();

        if hits.is_empty() {
            info!(
                sport = %category.sport,
                gender = %category.gender,
                "Category not present in this spreadsheet"
            );
            continue;
        }

        debug!(
            sport = %category.sport,
            gender = %category.gender,
            columns = ?hits,
            "Matched category columns"
        );
        matched.push(MatchedCategory {
            category,
            columns: hits,
        });
    }

    matched
}
