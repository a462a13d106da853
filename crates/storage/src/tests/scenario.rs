use pretty_assertions::assert_eq;
use realty_domain::{
    ClientForm, CreateError, DeleteError, FlatForm, Panel, ReadError, ReportService, Row,
    Service, Status, UpdateError, ValidationError,
};
use tempfile::TempDir;

use crate::Sqlite;

fn service() -> (TempDir, Service<Sqlite>) {
    let dir = tempfile::tempdir().unwrap();
    let sqlite = Sqlite::new(dir.path().join("realestate_db.sqlite3"));
    sqlite.ensure_schema().unwrap();
    (dir, Service::new(sqlite))
}

fn flat_form(location: &str, price: &str, status: Status) -> FlatForm {
    FlatForm {
        location: location.to_string(),
        area: "1200".to_string(),
        price: price.to_string(),
        status,
        seller_name: "J. Doe".to_string(),
    }
}

fn cells(panel: &Panel<FlatForm>) -> Vec<Vec<String>> {
    panel.presenter().rows().iter().map(Row::cells).collect()
}

#[test]
fn test_add_lakeview() {
    let (_dir, service) = service();
    let mut panel = Panel::<FlatForm>::new();
    panel.refresh(&service).unwrap();

    panel.form = flat_form("Lakeview", "250000", Status::Available);
    panel.add(&service).unwrap();

    assert_eq!(
        cells(&panel),
        [["1", "Lakeview", "1200", "250000.00", "Available", "J. Doe"]]
    );
}

#[test]
fn test_update_keeps_row_count() {
    let (_dir, service) = service();
    let mut panel = Panel::<FlatForm>::new();
    for location in ["A", "B", "C"] {
        panel.form = flat_form(location, "100", Status::Available);
        panel.add(&service).unwrap();
    }

    panel.select(1).unwrap();
    panel.form = flat_form("B2", "150.25", Status::NotAvailable);
    panel.update(&service).unwrap();

    assert_eq!(panel.presenter().len(), 3);
    assert_eq!(
        cells(&panel)[1],
        ["2", "B2", "1200", "150.25", "Not Available", "J. Doe"]
    );
}

#[test]
fn test_delete_removes_exactly_one_row() {
    let (_dir, service) = service();
    let mut panel = Panel::<FlatForm>::new();
    for location in ["A", "B", "C"] {
        panel.form = flat_form(location, "100", Status::Available);
        panel.add(&service).unwrap();
    }

    panel.select(0).unwrap();
    panel.delete(&service).unwrap();

    assert_eq!(
        panel
            .presenter()
            .rows()
            .iter()
            .map(|flat| *flat.id)
            .collect::<Vec<_>>(),
        [2, 3]
    );
}

#[test]
fn test_no_selection_never_writes() {
    let (_dir, service) = service();
    let mut panel = Panel::<FlatForm>::new();
    panel.form = flat_form("A", "100", Status::Available);
    panel.add(&service).unwrap();
    let before = cells(&panel);

    panel.form = flat_form("Z", "1", Status::NotAvailable);
    assert!(matches!(
        panel.update(&service),
        Err(UpdateError::NoSelection)
    ));
    assert!(matches!(
        panel.delete(&service),
        Err(DeleteError::NoSelection)
    ));

    panel.refresh(&service).unwrap();
    assert_eq!(cells(&panel), before);
}

#[test]
fn test_invalid_price_never_writes() {
    let (_dir, service) = service();
    let mut panel = Panel::<FlatForm>::new();
    panel.form = flat_form("A", "abc", Status::Available);

    assert!(matches!(
        panel.add(&service),
        Err(CreateError::Validation(ValidationError::NotANumber("Price")))
    ));

    panel.refresh(&service).unwrap();
    assert!(panel.presenter().is_empty());
}

#[test]
fn test_blank_budget_is_stored_as_zero() {
    let (_dir, service) = service();
    let mut panel = Panel::<ClientForm>::new();
    panel.form = ClientForm {
        name: "Ann Lee".to_string(),
        contact: "555-0100".to_string(),
        preferred_area: "Lakeview".to_string(),
        budget: String::new(),
    };

    panel.add(&service).unwrap();
    panel.refresh(&service).unwrap();

    assert_eq!(
        panel.presenter().rows()[0].cells(),
        ["1", "Ann Lee", "555-0100", "Lakeview", "0.00"]
    );
}

#[test]
fn test_status_counts() {
    let (_dir, service) = service();
    let mut panel = Panel::<FlatForm>::new();
    for status in [Status::Available, Status::Available, Status::NotAvailable] {
        panel.form = flat_form("A", "100", status);
        panel.add(&service).unwrap();
    }

    let counts = service.get_status_counts().unwrap();

    assert_eq!(
        counts.iter().collect::<Vec<_>>(),
        [("Available", 2), ("Not Available", 1)]
    );
}

#[test]
fn test_status_counts_of_empty_table() {
    let (_dir, service) = service();

    assert!(matches!(
        service.get_status_counts(),
        Err(ReadError::NoData)
    ));
}

fn client_form(name: &str, budget: &str) -> ClientForm {
    ClientForm {
        name: name.to_string(),
        contact: "555-0100".to_string(),
        preferred_area: "Lakeview".to_string(),
        budget: budget.to_string(),
    }
}

fn client_panel(service: &Service<Sqlite>) -> Panel<ClientForm> {
    let mut panel = Panel::<ClientForm>::new();
    for name in ["Ann", "Bob", "Cid"] {
        panel.form = client_form(name, "1000");
        panel.add(service).unwrap();
    }
    panel
}

#[test]
fn test_update_client_keeps_row_count() {
    let (_dir, service) = service();
    let mut panel = client_panel(&service);

    panel.select(1).unwrap();
    panel.form.name = "Bea".to_string();
    panel.form.budget = "2500.5".to_string();
    panel.update(&service).unwrap();

    assert_eq!(panel.presenter().len(), 3);
    assert_eq!(
        panel.presenter().rows()[1].cells(),
        ["2", "Bea", "555-0100", "Lakeview", "2500.50"]
    );
}

#[test]
fn test_update_client_with_blank_budget_stores_zero() {
    let (_dir, service) = service();
    let mut panel = client_panel(&service);

    panel.select(0).unwrap();
    panel.form.budget = " ".to_string();
    panel.update(&service).unwrap();
    panel.refresh(&service).unwrap();

    assert_eq!(
        panel.presenter().rows()[0].cells(),
        ["1", "Ann", "555-0100", "Lakeview", "0.00"]
    );
}

#[test]
fn test_delete_client_removes_exactly_one_row() {
    let (_dir, service) = service();
    let mut panel = client_panel(&service);

    panel.select(2).unwrap();
    panel.delete(&service).unwrap();

    assert_eq!(
        panel
            .presenter()
            .rows()
            .iter()
            .map(|client| *client.id)
            .collect::<Vec<_>>(),
        [1, 2]
    );
}

#[test]
fn test_client_without_selection_never_writes() {
    let (_dir, service) = service();
    let mut panel = client_panel(&service);
    let before = panel.presenter().rows().to_vec();

    panel.form = client_form("Zed", "1");
    assert!(matches!(
        panel.update(&service),
        Err(UpdateError::NoSelection)
    ));
    assert!(matches!(
        panel.delete(&service),
        Err(DeleteError::NoSelection)
    ));

    panel.refresh(&service).unwrap();
    assert_eq!(panel.presenter().rows(), before.as_slice());
}
