//! Publish readiness checklist.
//!
//! A store goes live only once it has a name, at least one category, and at
//! least one active menu item. Switched-off items never reach customers, so
//! they do not count.

/// Returned when publishing is attempted before the checklist passes.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("store is not ready to publish: {}", .missing.join(", "))]
pub struct NotReady {
    /// Labels of the unmet checklist items.
    pub missing: Vec<&'static str>,
}

/// One line of the checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub label: String,
    pub done: bool,
}

/// Snapshot of what a store has configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishChecklist {
    pub has_name: bool,
    pub category_count: usize,
    /// Active menu items only.
    pub item_count: usize,
}

impl PublishChecklist {
    /// Build a checklist from the store name and menu counts.
    #[must_use]
    pub fn new(store_name: &str, category_count: usize, item_count: usize) -> Self {
        Self {
            has_name: !store_name.trim().is_empty(),
            category_count,
            item_count,
        }
    }

    /// Whether every requirement holds.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.has_name && self.category_count > 0 && self.item_count > 0
    }

    /// Labels of unmet requirements.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.has_name {
            missing.push("store name");
        }
        if self.category_count == 0 {
            missing.push("at least one category");
        }
        if self.item_count == 0 {
            missing.push("at least one active menu item");
        }
        missing
    }

    /// Checklist lines as shown in the builder.
    #[must_use]
    pub fn items(&self) -> Vec<ChecklistItem> {
        vec![
            ChecklistItem {
                label: "Store name configured".to_owned(),
                done: self.has_name,
            },
            ChecklistItem {
                label: format!("Categories added ({})", self.category_count),
                done: self.category_count > 0,
            },
            ChecklistItem {
                label: format!("Active menu items ({})", self.item_count),
                done: self.item_count > 0,
            },
        ]
    }

    /// Succeed only when the store may be published.
    ///
    /// # Errors
    ///
    /// Returns [`NotReady`] listing the unmet requirements.
    pub fn ensure_ready(&self) -> Result<(), NotReady> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(NotReady {
                missing: self.missing(),
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_without_name() {
        let checklist = PublishChecklist::new("   ", 1, 1);
        assert!(!checklist.is_ready());
        assert_eq!(checklist.missing(), vec!["store name"]);
    }

    #[test]
    fn test_blocked_without_categories_or_items() {
        let checklist = PublishChecklist::new("Casa", 0, 0);
        let err = checklist.ensure_ready().unwrap_err();
        assert_eq!(
            err.to_string(),
            "store is not ready to publish: at least one category, at least one active menu item"
        );
    }

    #[test]
    fn test_ready() {
        let checklist = PublishChecklist::new("Casa", 2, 5);
        assert!(checklist.ensure_ready().is_ok());
        assert!(checklist.items().iter().all(|item| item.done));
        assert_eq!(checklist.items()[1].label, "Categories added (2)");
    }
}
