use std::collections::BTreeMap;

use formcraft_spec::response::Answer;

/// Respondent-side state for one categorize question: the item-to-category
/// assignments plus the transient drag interaction.
///
/// Assignments key on the item's text label, so two items with identical
/// labels collapse into a single entry.
#[derive(Debug, Clone, Default)]
pub struct CategorizeSession {
    assignments: BTreeMap<String, String>,
    dragged: Option<String>,
}

impl CategorizeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging an item, replacing any in-flight drag.
    pub fn start_drag(&mut self, item: impl Into<String>) {
        self.dragged = Some(item.into());
    }

    /// Drop the dragged item onto a category. Without an active drag this
    /// does nothing; either way the transient drag state is cleared.
    pub fn drop_on(&mut self, category: &str) {
        if let Some(item) = self.dragged.take() {
            self.assignments.insert(item, category.to_string());
        }
    }

    /// A drag that ends without a valid target discards the transient
    /// state only; no assignment changes.
    pub fn cancel_drag(&mut self) {
        self.dragged = None;
    }

    pub fn dragged(&self) -> Option<&str> {
        self.dragged.as_deref()
    }

    /// Unassign an item, returning it to the pool.
    pub fn remove(&mut self, item: &str) {
        self.assignments.remove(item);
    }

    /// Items currently assigned to `category`, in item-list order.
    pub fn items_in_category<'a>(&self, items: &'a [String], category: &str) -> Vec<&'a str> {
        items
            .iter()
            .filter(|item| {
                self.assignments
                    .get(*item)
                    .is_some_and(|assigned| assigned == category)
            })
            .map(String::as_str)
            .collect()
    }

    /// The complement pool: items with no assignment yet.
    pub fn unassigned_items<'a>(&self, items: &'a [String]) -> Vec<&'a str> {
        items
            .iter()
            .filter(|item| !self.assignments.contains_key(*item))
            .map(String::as_str)
            .collect()
    }

    pub fn assignments(&self) -> &BTreeMap<String, String> {
        &self.assignments
    }

    /// The answer reported upward: the mapping itself.
    pub fn answer(&self) -> Answer {
        Answer::Categorize(self.assignments.clone())
    }
}
