//! Rule-based sentence classification with ordered precedence.

use crate::pipeline::patterns::role_matches;
use crate::types::Category;

/// Assigns exactly one category to a sentence, first-match-wins.
///
/// Governance is checked before the metric flag: oversight language often
/// quotes numbers ("the board reviewed a 20% reduction target") and must not
/// be absorbed into `metric`.
pub fn classify(sentence: &str, has_metric: bool) -> Category {
    if role_matches(Category::Governance, sentence) {
        return Category::Governance;
    }
    if has_metric {
        return Category::Metric;
    }
    for role in [Category::Vision, Category::Action, Category::Marketing] {
        if role_matches(role, sentence) {
            return role;
        }
    }
    Category::Other
}
