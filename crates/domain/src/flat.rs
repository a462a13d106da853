use derive_more::{Deref, Display, From};
use strum::IntoEnumIterator;

use crate::{
    Amount, AmountError, CreateError, DeleteError, Form, FormError, ReadError, RecordManager, Row,
    UpdateError, ValidationError,
};

pub trait FlatService {
    fn get_flats(&self) -> Result<Vec<Flat>, ReadError>;
    fn create_flat(
        &self,
        location: String,
        area: String,
        price: Amount,
        status: Status,
        seller_name: String,
    ) -> Result<Flat, CreateError>;
    fn replace_flat(&self, flat: Flat) -> Result<Flat, UpdateError>;
    fn delete_flat(&self, id: FlatID) -> Result<FlatID, DeleteError>;

    fn validate_flat_price(&self, price: &str) -> Result<Amount, ValidationError> {
        price.parse::<Amount>().map_err(|err| match err {
            AmountError::Empty => ValidationError::Empty("Price"),
            AmountError::NotANumber => ValidationError::NotANumber("Price"),
            AmountError::Negative => ValidationError::Negative("Price"),
            AmountError::OutOfRange => ValidationError::OutOfRange("Price"),
        })
    }
}

pub trait FlatRepository {
    fn read_flats(&self) -> Result<Vec<Flat>, ReadError>;
    fn create_flat(
        &self,
        location: String,
        area: String,
        price: Amount,
        status: Status,
        seller_name: String,
    ) -> Result<Flat, CreateError>;
    fn replace_flat(&self, flat: Flat) -> Result<Flat, UpdateError>;
    fn delete_flat(&self, id: FlatID) -> Result<FlatID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flat {
    pub id: FlatID,
    pub location: String,
    pub area: String,
    pub price: Amount,
    pub status: Status,
    pub seller_name: String,
}

impl Row for Flat {
    type Key = FlatID;

    const ENTITY: &'static str = "flat";
    const COLUMNS: &'static [&'static str] = &["ID", "Location", "Area", "Price", "Status", "Seller"];

    fn key(&self) -> FlatID {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.location.clone(),
            self.area.clone(),
            self.price.to_string(),
            self.status.to_string(),
            self.seller_name.clone(),
        ]
    }
}

#[derive(Deref, Display, From, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlatID(i64);

#[derive(
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
)]
pub enum Status {
    #[default]
    #[strum(serialize = "Available")]
    Available,
    #[strum(serialize = "Not Available")]
    NotAvailable,
}

impl Status {
    #[must_use]
    pub fn labels() -> Vec<String> {
        Status::iter().map(|status| status.to_string()).collect()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlatForm {
    pub location: String,
    pub area: String,
    pub price: String,
    pub status: Status,
    pub seller_name: String,
}

impl Form for FlatForm {
    type Record = Flat;

    const FIELDS: &'static [&'static str] = &["location", "area", "price", "status", "seller"];

    fn load(record: &Flat) -> Self {
        Self {
            location: record.location.clone(),
            area: record.area.clone(),
            price: record.price.to_string(),
            status: record.status,
            seller_name: record.seller_name.clone(),
        }
    }

    fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "location" => self.location = value.to_string(),
            "area" => self.area = value.to_string(),
            "price" => self.price = value.to_string(),
            "status" => {
                self.status = value
                    .trim()
                    .parse::<Status>()
                    .map_err(|_| FormError::InvalidChoice {
                        field: "Status",
                        expected: Status::labels(),
                    })?;
            }
            "seller" => self.seller_name = value.to_string(),
            _ => {
                return Err(FormError::UnknownField {
                    field: field.to_string(),
                    expected: Self::FIELDS,
                });
            }
        }
        Ok(())
    }

    fn values(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Location", self.location.clone()),
            ("Area", self.area.clone()),
            ("Price", self.price.clone()),
            ("Status", self.status.to_string()),
            ("Seller Name", self.seller_name.clone()),
        ]
    }
}

impl<S: FlatService> RecordManager<FlatForm> for S {
    fn read(&self) -> Result<Vec<Flat>, ReadError> {
        self.get_flats()
    }

    fn create(&self, form: &FlatForm) -> Result<Flat, CreateError> {
        let price = self.validate_flat_price(&form.price)?;
        self.create_flat(
            form.location.clone(),
            form.area.clone(),
            price,
            form.status,
            form.seller_name.clone(),
        )
    }

    fn replace(&self, id: FlatID, form: &FlatForm) -> Result<Flat, UpdateError> {
        let price = self.validate_flat_price(&form.price)?;
        self.replace_flat(Flat {
            id,
            location: form.location.clone(),
            area: form.area.clone(),
            price,
            status: form.status,
            seller_name: form.seller_name.clone(),
        })
    }

    fn delete(&self, id: FlatID) -> Result<FlatID, DeleteError> {
        self.delete_flat(id)
    }
}
