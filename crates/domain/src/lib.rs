#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod amount;
mod client;
mod error;
mod flat;
mod panel;
mod presenter;
mod report;
mod service;


pub use amount::{Amount, AmountError};
pub use client::{Client, ClientForm, ClientID, ClientRepository, ClientService};
pub use error::{
    CreateError, DeleteError, ReadError, StorageError, UpdateError, ValidationError,
};
pub use flat::{Flat, FlatForm, FlatID, FlatRepository, FlatService, Status};
pub use panel::{Form, FormError, Panel, RecordManager};
pub use presenter::{ListPresenter, Row, SelectionError};
pub use report::{ReportRepository, ReportService, StatusCounts};
pub use service::Service;
