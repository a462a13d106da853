#![allow(clippy::missing_errors_doc)]

use std::path::{Path, PathBuf};

use log::debug;
use realty_domain as domain;
use rusqlite::{Connection, ErrorCode, OpenFlags, Params, params};
use strum::AsRefStr;

/// Gateway to a SQLite database holding the `flats` and `clients` tables.
///
/// Every operation opens its own connection, which is closed when the
/// operation returns, on success as well as on failure.
#[derive(Debug, Clone)]
pub struct Sqlite {
    path: PathBuf,
}

impl Sqlite {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self, create: bool) -> Result<Connection, domain::StorageError> {
        let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if create {
            flags |= OpenFlags::SQLITE_OPEN_CREATE;
        }
        Connection::open_with_flags(&self.path, flags).map_err(|err| {
            domain::StorageError::NoConnection(format!("{}: {err}", self.path.display()))
        })
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, domain::StorageError> {
        let connection = self.open(false)?;
        f(&connection).map_err(storage_error)
    }

    /// Create the database and both tables unless they already exist.
    pub fn ensure_schema(&self) -> Result<(), domain::StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|err| {
                    domain::StorageError::NoConnection(format!("{}: {err}", parent.display()))
                })?;
                debug!("created directory {}", parent.display());
            }
        }

        let connection = self.open(true)?;
        for table in [Table::Flats, Table::Clients] {
            connection
                .execute(table.definition(), [])
                .map_err(|err| match storage_error(err) {
                    domain::StorageError::NoConnection(reason) => {
                        domain::StorageError::NoConnection(reason)
                    }
                    err => domain::StorageError::Schema(err.to_string()),
                })?;

            let columns = connection
                .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
                .and_then(|mut statement| {
                    let names = statement
                        .query_map([table.as_ref()], |row| row.get::<_, String>(0))?
                        .collect::<rusqlite::Result<Vec<_>>>();
                    names
                })
                .map_err(storage_error)?;

            if columns != table.columns() {
                return Err(domain::StorageError::Schema(format!(
                    "table {} has columns ({}), expected ({})",
                    table.as_ref(),
                    columns.join(", "),
                    table.columns().join(", ")
                )));
            }
        }
        debug!("ensured schema of {}", self.path.display());

        Ok(())
    }

    /// Run one insert, update or delete statement and return the number of affected rows.
    pub fn execute_write<P: Params>(
        &self,
        statement: &str,
        params: P,
    ) -> Result<usize, domain::StorageError> {
        self.with_connection(|connection| connection.execute(statement, params))
    }

    /// Run one insert statement and return the generated key.
    pub fn execute_insert<P: Params>(
        &self,
        statement: &str,
        params: P,
    ) -> Result<i64, domain::StorageError> {
        self.with_connection(|connection| {
            connection.execute(statement, params)?;
            Ok(connection.last_insert_rowid())
        })
    }

    /// Read all rows of a table in key order.
    pub fn fetch_all<R: FromRow>(&self, table: Table) -> Result<Vec<R>, domain::StorageError> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY {}",
            table.columns().join(", "),
            table.as_ref(),
            table.key()
        );
        self.with_connection(|connection| {
            let mut statement = connection.prepare(&query)?;
            let rows = statement
                .query_map([], |row| R::from_row(row))?
                .collect::<rusqlite::Result<Vec<_>>>();
            rows
        })
    }

    /// Count the flats per status. A missing status counts as the default status.
    pub fn fetch_status_counts(&self) -> Result<domain::StatusCounts, domain::StorageError> {
        let counts = self.with_connection(|connection| {
            let mut statement = connection.prepare(
                "SELECT COALESCE(status, ?1), COUNT(*) FROM flats GROUP BY 1",
            )?;
            let counts = statement
                .query_map([domain::Status::default().to_string()], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
                })?
                .collect::<rusqlite::Result<Vec<_>>>();
            counts
        })?;
        let counts = counts
            .into_iter()
            .map(|(status, count)| {
                let status = status.parse::<domain::Status>().map_err(|_| {
                    domain::StorageError::Constraint(format!("unknown status '{status}' of flats"))
                })?;
                Ok((status.to_string(), u64::try_from(count).unwrap_or_default()))
            })
            .collect::<Result<Vec<_>, domain::StorageError>>()?;
        Ok(domain::StatusCounts::new(counts))
    }
}

#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    #[strum(serialize = "flats")]
    Flats,
    #[strum(serialize = "clients")]
    Clients,
}

impl Table {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Table::Flats => "flat_id",
            Table::Clients => "client_id",
        }
    }

    #[must_use]
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Table::Flats => &[
                "flat_id",
                "location",
                "area",
                "price",
                "status",
                "seller_name",
            ],
            Table::Clients => &["client_id", "name", "contact", "preferred_area", "budget"],
        }
    }

    fn definition(self) -> &'static str {
        match self {
            Table::Flats => {
                "CREATE TABLE IF NOT EXISTS flats (
                    flat_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    location VARCHAR(100),
                    area VARCHAR(50),
                    price DECIMAL(10,2),
                    status VARCHAR(50),
                    seller_name VARCHAR(100)
                )"
            }
            Table::Clients => {
                "CREATE TABLE IF NOT EXISTS clients (
                    client_id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name VARCHAR(100),
                    contact VARCHAR(15),
                    preferred_area VARCHAR(100),
                    budget DECIMAL(10,2)
                )"
            }
        }
    }
}

pub trait FromRow: Sized {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self>;
}

fn storage_error(err: rusqlite::Error) -> domain::StorageError {
    match err {
        rusqlite::Error::SqliteFailure(ref failure, _) => match failure.code {
            ErrorCode::CannotOpen
            | ErrorCode::NotADatabase
            | ErrorCode::PermissionDenied
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
            | ErrorCode::SystemIoFailure => domain::StorageError::NoConnection(err.to_string()),
            ErrorCode::ConstraintViolation | ErrorCode::TypeMismatch | ErrorCode::TooBig => {
                domain::StorageError::Constraint(err.to_string())
            }
            ErrorCode::SchemaChanged => domain::StorageError::Schema(err.to_string()),
            _ => domain::StorageError::Other(Box::new(err)),
        },
        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..)
        | rusqlite::Error::InvalidColumnType(..) => {
            domain::StorageError::Constraint(err.to_string())
        }
        _ => domain::StorageError::Other(Box::new(err)),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flat {
    pub flat_id: i64,
    pub location: Option<String>,
    pub area: Option<String>,
    pub price: Option<f64>,
    pub status: Option<String>,
    pub seller_name: Option<String>,
}

impl FromRow for Flat {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            flat_id: row.get(0)?,
            location: row.get(1)?,
            area: row.get(2)?,
            price: row.get(3)?,
            status: row.get(4)?,
            seller_name: row.get(5)?,
        })
    }
}

impl TryFrom<Flat> for domain::Flat {
    type Error = domain::StorageError;

    fn try_from(value: Flat) -> Result<Self, Self::Error> {
        let status = match value.status {
            Some(status) => status.parse().map_err(|_| {
                domain::StorageError::Constraint(format!(
                    "unknown status '{status}' of flat {}",
                    value.flat_id
                ))
            })?,
            None => domain::Status::default(),
        };
        Ok(Self {
            id: value.flat_id.into(),
            location: value.location.unwrap_or_default(),
            area: value.area.unwrap_or_default(),
            price: amount(value.price, "price", value.flat_id)?,
            status,
            seller_name: value.seller_name.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub client_id: i64,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub preferred_area: Option<String>,
    pub budget: Option<f64>,
}

impl FromRow for Client {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            client_id: row.get(0)?,
            name: row.get(1)?,
            contact: row.get(2)?,
            preferred_area: row.get(3)?,
            budget: row.get(4)?,
        })
    }
}

impl TryFrom<Client> for domain::Client {
    type Error = domain::StorageError;

    fn try_from(value: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.client_id.into(),
            name: value.name.unwrap_or_default(),
            contact: value.contact.unwrap_or_default(),
            preferred_area: value.preferred_area.unwrap_or_default(),
            budget: amount(value.budget, "budget", value.client_id)?,
        })
    }
}

fn amount(
    value: Option<f64>,
    column: &str,
    key: i64,
) -> Result<domain::Amount, domain::StorageError> {
    value.map_or(Ok(domain::Amount::ZERO), |value| {
        domain::Amount::from_f64(value).map_err(|err| {
            domain::StorageError::Constraint(format!("{column} of row {key}: {err}"))
        })
    })
}

impl domain::FlatRepository for Sqlite {
    fn read_flats(&self) -> Result<Vec<domain::Flat>, domain::ReadError> {
        Ok(self
            .fetch_all::<Flat>(Table::Flats)?
            .into_iter()
            .map(domain::Flat::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }

    fn create_flat(
        &self,
        location: String,
        area: String,
        price: domain::Amount,
        status: domain::Status,
        seller_name: String,
    ) -> Result<domain::Flat, domain::CreateError> {
        let id = self.execute_insert(
            "INSERT INTO flats (location, area, price, status, seller_name) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                location,
                area,
                price.as_f64(),
                status.to_string(),
                seller_name
            ],
        )?;
        Ok(domain::Flat {
            id: id.into(),
            location,
            area,
            price,
            status,
            seller_name,
        })
    }

    fn replace_flat(&self, flat: domain::Flat) -> Result<domain::Flat, domain::UpdateError> {
        let rows = self.execute_write(
            "UPDATE flats SET location = ?1, area = ?2, price = ?3, status = ?4, seller_name = ?5 WHERE flat_id = ?6",
            params![
                flat.location,
                flat.area,
                flat.price.as_f64(),
                flat.status.to_string(),
                flat.seller_name,
                *flat.id
            ],
        )?;
        if rows == 0 {
            return Err(domain::UpdateError::NotFound);
        }
        Ok(flat)
    }

    fn delete_flat(&self, id: domain::FlatID) -> Result<domain::FlatID, domain::DeleteError> {
        let rows = self.execute_write("DELETE FROM flats WHERE flat_id = ?1", [*id])?;
        if rows == 0 {
            return Err(domain::DeleteError::NotFound);
        }
        Ok(id)
    }
}

impl domain::ClientRepository for Sqlite {
    fn read_clients(&self) -> Result<Vec<domain::Client>, domain::ReadError> {
        Ok(self
            .fetch_all::<Client>(Table::Clients)?
            .into_iter()
            .map(domain::Client::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }

    fn create_client(
        &self,
        name: String,
        contact: String,
        preferred_area: String,
        budget: domain::Amount,
    ) -> Result<domain::Client, domain::CreateError> {
        let id = self.execute_insert(
            "INSERT INTO clients (name, contact, preferred_area, budget) VALUES (?1, ?2, ?3, ?4)",
            params![name, contact, preferred_area, budget.as_f64()],
        )?;
        Ok(domain::Client {
            id: id.into(),
            name,
            contact,
            preferred_area,
            budget,
        })
    }

    fn replace_client(
        &self,
        client: domain::Client,
    ) -> Result<domain::Client, domain::UpdateError> {
        let rows = self.execute_write(
            "UPDATE clients SET name = ?1, contact = ?2, preferred_area = ?3, budget = ?4 WHERE client_id = ?5",
            params![
                client.name,
                client.contact,
                client.preferred_area,
                client.budget.as_f64(),
                *client.id
            ],
        )?;
        if rows == 0 {
            return Err(domain::UpdateError::NotFound);
        }
        Ok(client)
    }

    fn delete_client(
        &self,
        id: domain::ClientID,
    ) -> Result<domain::ClientID, domain::DeleteError> {
        let rows = self.execute_write("DELETE FROM clients WHERE client_id = ?1", [*id])?;
        if rows == 0 {
            return Err(domain::DeleteError::NotFound);
        }
        Ok(id)
    }
}

impl domain::ReportRepository for Sqlite {
    fn read_status_counts(&self) -> Result<domain::StatusCounts, domain::ReadError> {
        Ok(self.fetch_status_counts()?)
    }
}
