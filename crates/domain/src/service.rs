use log::{debug, error};

use crate::{
    Amount, Client, ClientID, ClientRepository, ClientService, CreateError, DeleteError, Flat,
    FlatID, FlatRepository, FlatService, ReadError, ReportRepository, ReportService, Status,
    StatusCounts, UpdateError,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection(_)) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: FlatRepository> FlatService for Service<R> {
    fn get_flats(&self) -> Result<Vec<Flat>, ReadError> {
        log_on_error!(self.repository.read_flats(), ReadError, "get", "flats")
    }

    fn create_flat(
        &self,
        location: String,
        area: String,
        price: Amount,
        status: Status,
        seller_name: String,
    ) -> Result<Flat, CreateError> {
        log_on_error!(
            self.repository
                .create_flat(location, area, price, status, seller_name),
            CreateError,
            "create",
            "flat"
        )
    }

    fn replace_flat(&self, flat: Flat) -> Result<Flat, UpdateError> {
        log_on_error!(
            self.repository.replace_flat(flat),
            UpdateError,
            "replace",
            "flat"
        )
    }

    fn delete_flat(&self, id: FlatID) -> Result<FlatID, DeleteError> {
        log_on_error!(
            self.repository.delete_flat(id),
            DeleteError,
            "delete",
            "flat"
        )
    }
}

impl<R: ClientRepository> ClientService for Service<R> {
    fn get_clients(&self) -> Result<Vec<Client>, ReadError> {
        log_on_error!(self.repository.read_clients(), ReadError, "get", "clients")
    }

    fn create_client(
        &self,
        name: String,
        contact: String,
        preferred_area: String,
        budget: Amount,
    ) -> Result<Client, CreateError> {
        log_on_error!(
            self.repository
                .create_client(name, contact, preferred_area, budget),
            CreateError,
            "create",
            "client"
        )
    }

    fn replace_client(&self, client: Client) -> Result<Client, UpdateError> {
        log_on_error!(
            self.repository.replace_client(client),
            UpdateError,
            "replace",
            "client"
        )
    }

    fn delete_client(&self, id: ClientID) -> Result<ClientID, DeleteError> {
        log_on_error!(
            self.repository.delete_client(id),
            DeleteError,
            "delete",
            "client"
        )
    }
}

impl<R: ReportRepository> ReportService for Service<R> {
    fn get_status_counts(&self) -> Result<StatusCounts, ReadError> {
        let counts = log_on_error!(
            self.repository.read_status_counts(),
            ReadError,
            "get",
            "status counts"
        )?;
        if counts.is_empty() {
            return Err(ReadError::NoData);
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{FlatForm, Panel, StorageError, tests::repository::MemoryRepository};

    use super::*;

    fn add_flat(service: &Service<MemoryRepository>, status: Status) {
        service
            .create_flat(
                "Lakeview".to_string(),
                "1200".to_string(),
                Amount::ZERO,
                status,
                "J. Doe".to_string(),
            )
            .unwrap();
    }

    #[test]
    fn test_get_status_counts() {
        let service = Service::new(MemoryRepository::default());
        add_flat(&service, Status::Available);
        add_flat(&service, Status::NotAvailable);
        add_flat(&service, Status::Available);

        let counts = service.get_status_counts().unwrap();

        assert_eq!(
            counts.iter().collect::<Vec<_>>(),
            [("Available", 2), ("Not Available", 1)]
        );
    }

    #[test]
    fn test_get_status_counts_without_flats() {
        let service = Service::new(MemoryRepository::default());

        assert!(matches!(
            service.get_status_counts(),
            Err(ReadError::NoData)
        ));
    }

    #[test]
    fn test_get_status_counts_after_delete_of_last_flat() {
        let service = Service::new(MemoryRepository::default());
        add_flat(&service, Status::Available);
        let mut panel = Panel::<FlatForm>::new();
        panel.refresh(&service).unwrap();
        panel.select(0).unwrap();
        panel.delete(&service).unwrap();

        assert!(matches!(
            service.get_status_counts(),
            Err(ReadError::NoData)
        ));
    }

    #[test]
    fn test_errors_are_passed_through() {
        let service = Service::new(MemoryRepository::default());
        service.repository().set_offline(true);

        assert!(matches!(
            service.get_flats(),
            Err(ReadError::Storage(StorageError::NoConnection(_)))
        ));
        assert!(matches!(
            service.get_status_counts(),
            Err(ReadError::Storage(StorageError::NoConnection(_)))
        ));
        assert!(matches!(
            service.delete_client(ClientID::from(1)),
            Err(DeleteError::Storage(StorageError::NoConnection(_)))
        ));
    }

    #[test]
    fn test_delete_missing_flat() {
        let service = Service::new(MemoryRepository::default());

        assert!(matches!(
            service.delete_flat(FlatID::from(42)),
            Err(DeleteError::NotFound)
        ));
    }
}
