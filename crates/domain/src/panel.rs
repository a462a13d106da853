use log::{debug, warn};

use crate::{
    CreateError, DeleteError, ListPresenter, ReadError, Row, SelectionError, UpdateError,
};

/// The working values of an entry form.
pub trait Form: Default + Clone + PartialEq {
    type Record: Row;

    const FIELDS: &'static [&'static str];

    /// Copy the fields of a selected record into a fresh form.
    fn load(record: &Self::Record) -> Self;

    fn set(&mut self, field: &str, value: &str) -> Result<(), FormError>;

    fn values(&self) -> Vec<(&'static str, String)>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown field '{field}' (expected one of: {})", .expected.join(", "))]
    UnknownField {
        field: String,
        expected: &'static [&'static str],
    },
    #[error("{field} must be one of: {}", .expected.join(", "))]
    InvalidChoice {
        field: &'static str,
        expected: Vec<String>,
    },
}

/// Create, read, update and delete records of one entity from the values of its form.
pub trait RecordManager<F: Form> {
    fn read(&self) -> Result<Vec<F::Record>, ReadError>;
    fn create(&self, form: &F) -> Result<F::Record, CreateError>;
    fn replace(&self, key: <F::Record as Row>::Key, form: &F) -> Result<F::Record, UpdateError>;
    fn delete(&self, key: <F::Record as Row>::Key)
    -> Result<<F::Record as Row>::Key, DeleteError>;
}

/// The state of one record panel: the entry form and the list with its selection.
pub struct Panel<F: Form> {
    pub form: F,
    presenter: ListPresenter<F::Record>,
}

impl<F: Form> Panel<F> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            form: F::default(),
            presenter: ListPresenter::new(),
        }
    }

    #[must_use]
    pub fn presenter(&self) -> &ListPresenter<F::Record> {
        &self.presenter
    }

    pub fn on_selection_changed(&mut self, observer: impl FnMut(&F::Record) + 'static) {
        self.presenter.on_selection_changed(observer);
    }

    #[must_use]
    pub fn selected_key(&self) -> Option<<F::Record as Row>::Key> {
        self.presenter.selected_key()
    }

    pub fn refresh(&mut self, manager: &impl RecordManager<F>) -> Result<(), ReadError> {
        let records = manager.read()?;
        self.presenter.refresh(records);
        Ok(())
    }

    /// Select a row and load its fields into the form.
    pub fn select(&mut self, index: usize) -> Result<(), SelectionError> {
        let record = self.presenter.select(index)?;
        self.form = F::load(record);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.presenter.clear_selection();
    }

    pub fn load_selection_into_form(&mut self, record: &F::Record) {
        self.form = F::load(record);
    }

    pub fn clear_form(&mut self) {
        self.form = F::default();
    }

    /// Create a record from the form and reload the list.
    ///
    /// Once the record is stored, a failing reload does not fail the
    /// operation. The list keeps its previous rows until the next refresh.
    pub fn add(&mut self, manager: &impl RecordManager<F>) -> Result<F::Record, CreateError> {
        let record = manager.create(&self.form)?;
        debug!("added {} {}", F::Record::ENTITY, record.key());
        self.refresh_after_write(manager);
        Ok(record)
    }

    pub fn update(&mut self, manager: &impl RecordManager<F>) -> Result<F::Record, UpdateError> {
        let key = self.selected_key().ok_or(UpdateError::NoSelection)?;
        match manager.replace(key, &self.form) {
            Ok(record) => {
                debug!("updated {} {key}", F::Record::ENTITY);
                self.refresh_after_write(manager);
                Ok(record)
            }
            Err(UpdateError::NotFound) => {
                self.refresh_after_write(manager);
                Err(UpdateError::NotFound)
            }
            Err(err) => Err(err),
        }
    }

    pub fn delete(
        &mut self,
        manager: &impl RecordManager<F>,
    ) -> Result<<F::Record as Row>::Key, DeleteError> {
        let key = self.selected_key().ok_or(DeleteError::NoSelection)?;
        match manager.delete(key) {
            Ok(key) => {
                debug!("deleted {} {key}", F::Record::ENTITY);
                self.refresh_after_write(manager);
                Ok(key)
            }
            Err(DeleteError::NotFound) => {
                self.refresh_after_write(manager);
                Err(DeleteError::NotFound)
            }
            Err(err) => Err(err),
        }
    }

    fn refresh_after_write(&mut self, manager: &impl RecordManager<F>) {
        if let Err(err) = self.refresh(manager) {
            warn!("failed to reload {}s: {err}", F::Record::ENTITY);
        }
    }
}

impl<F: Form> Default for Panel<F> {
    fn default() -> Self {
        Self::new()
    }
}
