use std::fmt;

use log::trace;

/// A record that can be shown as one line of a list.
pub trait Row {
    type Key: Copy + Eq + fmt::Debug + fmt::Display;

    const ENTITY: &'static str;
    const COLUMNS: &'static [&'static str];

    fn key(&self) -> Self::Key;
    fn cells(&self) -> Vec<String>;
}

/// The current rows of one entity together with a single-row selection.
///
/// Every refresh replaces all rows and clears the selection. The only
/// identity a row keeps across refreshes is its key.
pub struct ListPresenter<T: Row> {
    rows: Vec<T>,
    selected: Option<usize>,
    observer: Option<Box<dyn FnMut(&T)>>,
}

impl<T: Row> ListPresenter<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: vec![],
            selected: None,
            observer: None,
        }
    }

    pub fn refresh(&mut self, rows: Vec<T>) {
        trace!("refresh {} list with {} rows", T::ENTITY, rows.len());
        self.rows = rows;
        self.selected = None;
    }

    /// Register the observer that is called whenever a row gets selected.
    ///
    /// A previously registered observer is replaced.
    pub fn on_selection_changed(&mut self, observer: impl FnMut(&T) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn select(&mut self, index: usize) -> Result<&T, SelectionError> {
        let len = self.rows.len();
        let row = self
            .rows
            .get(index)
            .ok_or(SelectionError::NoSuchRow { index, len })?;
        self.selected = Some(index);
        if let Some(observer) = self.observer.as_mut() {
            observer(row);
        }
        Ok(row)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        self.selected.and_then(|index| self.rows.get(index))
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected_key(&self) -> Option<T::Key> {
        self.selected().map(Row::key)
    }

    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T: Row> Default for ListPresenter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Row + fmt::Debug> fmt::Debug for ListPresenter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListPresenter")
            .field("rows", &self.rows)
            .field("selected", &self.selected)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("row {} does not exist ({len} rows)", .index + 1)]
    NoSuchRow { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(u32, &'static str);

    impl Row for Item {
        type Key = u32;

        const ENTITY: &'static str = "item";
        const COLUMNS: &'static [&'static str] = &["ID", "Name"];

        fn key(&self) -> u32 {
            self.0
        }

        fn cells(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    fn presenter() -> ListPresenter<Item> {
        let mut presenter = ListPresenter::new();
        presenter.refresh(vec![Item(1, "A"), Item(2, "B"), Item(5, "C")]);
        presenter
    }

    #[test]
    fn test_refresh_replaces_rows_and_clears_selection() {
        let mut presenter = presenter();
        presenter.select(1).unwrap();

        presenter.refresh(vec![Item(7, "D")]);

        assert_eq!(presenter.rows(), &[Item(7, "D")]);
        assert_eq!(presenter.selected(), None);
        assert_eq!(presenter.selected_key(), None);
    }

    #[test]
    fn test_select() {
        let mut presenter = presenter();

        assert_eq!(presenter.select(2), Ok(&Item(5, "C")));
        assert_eq!(presenter.selected_index(), Some(2));
        assert_eq!(presenter.selected_key(), Some(5));

        assert_eq!(presenter.select(0), Ok(&Item(1, "A")));
        assert_eq!(presenter.selected_key(), Some(1));
    }

    #[test]
    fn test_select_out_of_range() {
        let mut presenter = presenter();
        presenter.select(0).unwrap();

        assert_eq!(
            presenter.select(3),
            Err(SelectionError::NoSuchRow { index: 3, len: 3 })
        );
        assert_eq!(presenter.selected_key(), Some(1));
    }

    #[test]
    fn test_observer_is_called_on_selection_only() {
        let mut presenter = presenter();
        let seen = Rc::new(RefCell::new(vec![]));
        let sink = seen.clone();
        presenter.on_selection_changed(move |item: &Item| sink.borrow_mut().push(item.clone()));

        presenter.select(1).unwrap();
        presenter.clear_selection();
        let _ = presenter.select(9);
        presenter.refresh(vec![]);

        assert_eq!(*seen.borrow(), vec![Item(2, "B")]);
    }

    #[test]
    fn test_observer_is_replaced() {
        let mut presenter = presenter();
        let first = Rc::new(RefCell::new(0));
        let second = Rc::new(RefCell::new(0));
        let counter = first.clone();
        presenter.on_selection_changed(move |_| *counter.borrow_mut() += 1);
        let counter = second.clone();
        presenter.on_selection_changed(move |_| *counter.borrow_mut() += 1);

        presenter.select(0).unwrap();

        assert_eq!(*first.borrow(), 0);
        assert_eq!(*second.borrow(), 1);
    }

    #[test]
    fn test_selection_error_display() {
        assert_eq!(
            SelectionError::NoSuchRow { index: 3, len: 2 }.to_string(),
            "row 4 does not exist (2 rows)"
        );
    }
}
