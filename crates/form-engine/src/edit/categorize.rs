/// Editor operations for a categorize payload. Categories and items are
/// independent lists; indices refer to current positions and removal
/// compacts the list.
#[derive(Debug, Clone, PartialEq)]
pub enum CategorizeEdit {
    /// Append a category with a generated placeholder name.
    AddCategory,
    UpdateCategory { index: usize, value: String },
    RemoveCategory { index: usize },
    /// Append an item with a generated placeholder name.
    AddItem,
    UpdateItem { index: usize, value: String },
    RemoveItem { index: usize },
}

pub(crate) fn apply(categories: &mut Vec<String>, items: &mut Vec<String>, op: CategorizeEdit) {
    match op {
        CategorizeEdit::AddCategory => {
            categories.push(format!("Category {}", categories.len() + 1));
        }
        CategorizeEdit::UpdateCategory { index, value } => {
            if let Some(slot) = categories.get_mut(index) {
                *slot = value;
            }
        }
        CategorizeEdit::RemoveCategory { index } => {
            if index < categories.len() {
                categories.remove(index);
            }
        }
        CategorizeEdit::AddItem => {
            items.push(format!("Item {}", items.len() + 1));
        }
        CategorizeEdit::UpdateItem { index, value } => {
            if let Some(slot) = items.get_mut(index) {
                *slot = value;
            }
        }
        CategorizeEdit::RemoveItem { index } => {
            if index < items.len() {
                items.remove(index);
            }
        }
    }
}
