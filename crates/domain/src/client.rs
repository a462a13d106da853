use derive_more::{Deref, Display, From};

use crate::{
    Amount, AmountError, CreateError, DeleteError, Form, FormError, ReadError, RecordManager, Row,
    UpdateError, ValidationError,
};

pub trait ClientService {
    fn get_clients(&self) -> Result<Vec<Client>, ReadError>;
    fn create_client(
        &self,
        name: String,
        contact: String,
        preferred_area: String,
        budget: Amount,
    ) -> Result<Client, CreateError>;
    fn replace_client(&self, client: Client) -> Result<Client, UpdateError>;
    fn delete_client(&self, id: ClientID) -> Result<ClientID, DeleteError>;

    /// A blank budget counts as zero.
    fn validate_client_budget(&self, budget: &str) -> Result<Amount, ValidationError> {
        match budget.parse::<Amount>() {
            Ok(budget) => Ok(budget),
            Err(AmountError::Empty) => Ok(Amount::ZERO),
            Err(AmountError::NotANumber) => Err(ValidationError::NotANumber("Budget")),
            Err(AmountError::Negative) => Err(ValidationError::Negative("Budget")),
            Err(AmountError::OutOfRange) => Err(ValidationError::OutOfRange("Budget")),
        }
    }
}

pub trait ClientRepository {
    fn read_clients(&self) -> Result<Vec<Client>, ReadError>;
    fn create_client(
        &self,
        name: String,
        contact: String,
        preferred_area: String,
        budget: Amount,
    ) -> Result<Client, CreateError>;
    fn replace_client(&self, client: Client) -> Result<Client, UpdateError>;
    fn delete_client(&self, id: ClientID) -> Result<ClientID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: ClientID,
    pub name: String,
    pub contact: String,
    pub preferred_area: String,
    pub budget: Amount,
}

impl Row for Client {
    type Key = ClientID;

    const ENTITY: &'static str = "client";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Contact", "Preferred Area", "Budget"];

    fn key(&self) -> ClientID {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.contact.clone(),
            self.preferred_area.clone(),
            self.budget.to_string(),
        ]
    }
}

#[derive(Deref, Display, From, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientID(i64);

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClientForm {
    pub name: String,
    pub contact: String,
    pub preferred_area: String,
    pub budget: String,
}

impl Form for ClientForm {
    type Record = Client;

    const FIELDS: &'static [&'static str] = &["name", "contact", "area", "budget"];

    fn load(record: &Client) -> Self {
        Self {
            name: record.name.clone(),
            contact: record.contact.clone(),
            preferred_area: record.preferred_area.clone(),
            budget: record.budget.to_string(),
        }
    }

    fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match field {
            "name" => self.name = value.to_string(),
            "contact" => self.contact = value.to_string(),
            "area" => self.preferred_area = value.to_string(),
            "budget" => self.budget = value.to_string(),
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
            ("Name", self.name.clone()),
            ("Contact", self.contact.clone()),
            ("Preferred Area", self.preferred_area.clone()),
            ("Budget", self.budget.clone()),
        ]
    }
}

impl<S: ClientService> RecordManager<ClientForm> for S {
    fn read(&self) -> Result<Vec<Client>, ReadError> {
        self.get_clients()
    }

    fn create(&self, form: &ClientForm) -> Result<Client, CreateError> {
        let budget = self.validate_client_budget(&form.budget)?;
        self.create_client(
            form.name.clone(),
            form.contact.clone(),
            form.preferred_area.clone(),
            budget,
        )
    }

    fn replace(&self, id: ClientID, form: &ClientForm) -> Result<Client, UpdateError> {
        let budget = self.validate_client_budget(&form.budget)?;
        self.replace_client(Client {
            id,
            name: form.name.clone(),
            contact: form.contact.clone(),
            preferred_area: form.preferred_area.clone(),
            budget,
        })
    }

    fn delete(&self, id: ClientID) -> Result<ClientID, DeleteError> {
        self.delete_client(id)
    }
}
