//! Display-order maintenance for orderable catalogs.
//!
//! Catalog vectors are kept sorted by position, and `display_order` is
//! renumbered `0..n` after every change so the field always matches the
//! vector index.

use std::collections::HashSet;

use crate::error::{StoreError, StoreResult};
use crate::models::{Qualification, WatchStation};

/// A named catalog entry with an explicit position.
pub(crate) trait DisplayOrdered {
    const KIND: &'static str;

    fn name(&self) -> &str;
    fn set_display_order(&mut self, order: usize);
}

impl DisplayOrdered for Qualification {
    const KIND: &'static str = "qualification";

    fn name(&self) -> &str {
        &self.name
    }

    fn set_display_order(&mut self, order: usize) {
        self.display_order = order;
    }
}

impl DisplayOrdered for WatchStation {
    const KIND: &'static str = "watch station";

    fn name(&self) -> &str {
        &self.name
    }

    fn set_display_order(&mut self, order: usize) {
        self.display_order = order;
    }
}

pub(crate) fn renumber<T: DisplayOrdered>(items: &mut [T]) {
    for (i, item) in items.iter_mut().enumerate() {
        item.set_display_order(i);
    }
}

/// Fails on the first empty or repeated name.
pub(crate) fn check_names<T: DisplayOrdered>(items: &[T]) -> StoreResult<()> {
    let mut seen = HashSet::new();
    for item in items {
        if item.name().trim().is_empty() {
            return Err(StoreError::EmptyName { kind: T::KIND });
        }
        if !seen.insert(item.name()) {
            return Err(StoreError::Duplicate {
                kind: T::KIND,
                name: item.name().to_string(),
            });
        }
    }
    Ok(())
}

pub(crate) fn position<T: DisplayOrdered>(items: &[T], name: &str) -> StoreResult<usize> {
    items
        .iter()
        .position(|i| i.name() == name)
        .ok_or_else(|| StoreError::NotFound {
            kind: T::KIND,
            name: name.to_string(),
        })
}

/// Swaps an entry with the one above it. `Ok(false)` if already first.
pub(crate) fn move_up<T: DisplayOrdered>(items: &mut [T], name: &str) -> StoreResult<bool> {
    let idx = position(items, name)?;
    if idx == 0 {
        return Ok(false);
    }
    items.swap(idx - 1, idx);
    renumber(items);
    Ok(true)
}

/// Swaps an entry with the one below it. `Ok(false)` if already last.
pub(crate) fn move_down<T: DisplayOrdered>(items: &mut [T], name: &str) -> StoreResult<bool> {
    let idx = position(items, name)?;
    if idx + 1 >= items.len() {
        return Ok(false);
    }
    items.swap(idx, idx + 1);
    renumber(items);
    Ok(true)
}

/// Moves an existing entry to `index`, shifting the others.
pub(crate) fn move_to<T: DisplayOrdered>(
    items: &mut Vec<T>,
    name: &str,
    index: usize,
) -> StoreResult<()> {
    let len = items.len();
    if index >= len {
        return Err(StoreError::IndexOutOfRange { index, len });
    }
    let from = position(items, name)?;
    let item = items.remove(from);
    items.insert(index, item);
    renumber(items);
    Ok(())
}

/// Inserts a new entry at `index` (`index == len` appends).
pub(crate) fn insert_at<T: DisplayOrdered>(
    items: &mut Vec<T>,
    item: T,
    index: usize,
) -> StoreResult<()> {
    let len = items.len();
    if index > len {
        return Err(StoreError::IndexOutOfRange { index, len });
    }
    items.insert(index, item);
    renumber(items);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[WatchStation]) -> Vec<&str> {
        items.iter().map(|s| s.name.as_str()).collect()
    }

    fn orders(items: &[WatchStation]) -> Vec<usize> {
        items.iter().map(|s| s.display_order).collect()
    }

    #[test]
    fn test_move_up_down() {
        let mut st = WatchStation::ordered(["A", "B", "C"]);

        assert!(move_up(&mut st, "C").unwrap());
        assert_eq!(names(&st), vec!["A", "C", "B"]);
        assert_eq!(orders(&st), vec![0, 1, 2]);

        assert!(!move_up(&mut st, "A").unwrap());
        assert!(!move_down(&mut st, "B").unwrap());

        assert!(move_down(&mut st, "A").unwrap());
        assert_eq!(names(&st), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_check_names() {
        assert!(check_names(&WatchStation::ordered(["A", "B"])).is_ok());
        assert!(matches!(
            check_names(&WatchStation::ordered(["A", "B", "A"])),
            Err(StoreError::Duplicate { kind: "watch station", .. })
        ));
        assert!(matches!(
            check_names(&[Qualification::new(" ", 0)]),
            Err(StoreError::EmptyName { kind: "qualification" })
        ));
    }

    #[test]
    fn test_move_missing() {
        let mut st = WatchStation::ordered(["A"]);
        let err = move_up(&mut st, "Z").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "watch station", .. }));
    }

    #[test]
    fn test_insert_and_move_to() {
        let mut st = WatchStation::ordered(["A", "B"]);
        insert_at(&mut st, WatchStation::new("X", 99), 1).unwrap();
        assert_eq!(names(&st), vec!["A", "X", "B"]);
        assert_eq!(orders(&st), vec![0, 1, 2]);

        insert_at(&mut st, WatchStation::new("Y", 0), 3).unwrap();
        assert_eq!(names(&st), vec!["A", "X", "B", "Y"]);

        assert!(matches!(
            insert_at(&mut st, WatchStation::new("Z", 0), 9),
            Err(StoreError::IndexOutOfRange { index: 9, len: 4 })
        ));

        move_to(&mut st, "Y", 0).unwrap();
        assert_eq!(names(&st), vec!["Y", "A", "X", "B"]);
        assert!(move_to(&mut st, "Y", 4).is_err());
    }
}
