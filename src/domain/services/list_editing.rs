//! Helpers the admin screens use to build the full list they bulk-replace.

use crate::domain::models::OrderedItem;

/// Replace the item with the same id, or append it
pub fn upsert_item<T: OrderedItem>(items: &[T], item: T) -> Vec<T> {
    let mut next = items.to_vec();
    match next.iter().position(|existing| existing.id() == item.id()) {
        Some(index) => next[index] = item,
        None => next.push(item),
    }
    next
}

/// Order value for an item appended at the end
pub fn next_display_order<T: OrderedItem>(items: &[T]) -> i32 {
    items
        .iter()
        .map(|item| item.display_order())
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults::default_services;
    use crate::domain::models::ServiceItem;

    #[test]
    fn test_upsert_replaces_in_place() {
        let services = default_services();
        let mut edited = services[1].clone();
        edited.title = "Security".to_string();

        let next = upsert_item(&services, edited);
        assert_eq!(next.len(), 4);
        assert_eq!(next[1].title, "Security");
    }

    #[test]
    fn test_upsert_appends_new() {
        let services = default_services();
        let next = upsert_item(&services, ServiceItem::new("Cloud", 5));
        assert_eq!(next.len(), 5);
        assert_eq!(next[4].title, "Cloud");
    }

    #[test]
    fn test_next_display_order() {
        assert_eq!(next_display_order::<ServiceItem>(&[]), 1);
        assert_eq!(next_display_order(&default_services()), 5);
    }

    #[test]
    fn test_next_display_order_saturates() {
        let items = vec![ServiceItem::new("last", i32::MAX)];
        assert_eq!(next_display_order(&items), i32::MAX);
    }
}
