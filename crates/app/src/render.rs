use console::style;
use realty_domain::{ListPresenter, Row};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    Info,
    Warning,
    Error,
}

/// Format a message the way a dialog would show it: a kind, a title and the text.
#[must_use]
pub fn dialog(kind: Dialog, title: &str, message: &str) -> String {
    let label = match kind {
        Dialog::Info => style("info").cyan(),
        Dialog::Warning => style("warning").yellow(),
        Dialog::Error => style("error").red(),
    };
    format!("[{label}] {title}: {message}")
}

/// Render the rows of a list as a table. The selected row is marked with `>`.
#[must_use]
pub fn table<T: Row>(presenter: &ListPresenter<T>) -> String {
    let columns = T::COLUMNS;
    let rows = presenter
        .rows()
        .iter()
        .map(Row::cells)
        .collect::<Vec<_>>();

    let row_numbers = (1..=rows.len()).map(|n| n.to_string()).collect::<Vec<_>>();
    let number_width = row_numbers.iter().map(|n| n.width()).max().unwrap_or(0).max(1);
    let mut widths = columns.iter().map(|c| c.width()).collect::<Vec<_>>();
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.width());
        }
    }

    let mut lines = vec![];
    let header = format!(
        "  {} {}",
        pad("#", number_width),
        columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| pad(column, *width))
            .collect::<Vec<_>>()
            .join(" | ")
    );
    lines.push(style(header.trim_end().to_string()).bold().to_string());
    lines.push(format!(
        "  {}-{}",
        "-".repeat(number_width),
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-")
    ));

    for (index, (number, cells)) in row_numbers.iter().zip(&rows).enumerate() {
        let marker = if presenter.selected_index() == Some(index) {
            ">"
        } else {
            " "
        };
        let line = format!(
            "{marker} {} {}",
            pad(number, number_width),
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| pad(cell, *width))
                .collect::<Vec<_>>()
                .join(" | ")
        );
        lines.push(line.trim_end().to_string());
    }

    if rows.is_empty() {
        lines.push(format!("  (no {}s)", T::ENTITY));
    }

    lines.join("\n")
}

/// Render the fields of an entry form, one per line.
#[must_use]
pub fn form(values: &[(&str, String)]) -> String {
    let width = values
        .iter()
        .map(|(label, _)| label.width() + 1)
        .max()
        .unwrap_or(0);
    values
        .iter()
        .map(|(label, value)| format!("  {} {value}", pad(&format!("{label}:"), width)))
        .map(|line| line.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use realty_domain::{Amount, Flat, FlatID, Status};

    use super::*;

    fn flats() -> ListPresenter<Flat> {
        let mut presenter = ListPresenter::new();
        presenter.refresh(vec![
            Flat {
                id: FlatID::from(1),
                location: "Lakeview".to_string(),
                area: "1200".to_string(),
                price: Amount::from_cents(25_000_000).unwrap(),
                status: Status::Available,
                seller_name: "J. Doe".to_string(),
            },
            Flat {
                id: FlatID::from(7),
                location: "Zürich".to_string(),
                area: "80".to_string(),
                price: Amount::from_cents(5).unwrap(),
                status: Status::NotAvailable,
                seller_name: String::new(),
            },
        ]);
        presenter
    }

    #[test]
    fn test_table() {
        let mut presenter = flats();
        presenter.select(1).unwrap();

        let table = console::strip_ansi_codes(&table(&presenter)).to_string();

        assert_eq!(
            table.lines().collect::<Vec<_>>(),
            [
                "  # ID | Location | Area | Price     | Status        | Seller",
                "  -----+----------+------+-----------+---------------+-------",
                "  1 1  | Lakeview | 1200 | 250000.00 | Available     | J. Doe",
                "> 2 7  | Zürich   | 80   | 0.05      | Not Available |",
            ]
        );
    }

    #[test]
    fn test_empty_table() {
        let presenter = ListPresenter::<Flat>::new();

        let table = console::strip_ansi_codes(&table(&presenter)).to_string();

        assert_eq!(table.lines().last(), Some("  (no flats)"));
    }

    #[test]
    fn test_form() {
        assert_eq!(
            form(&[
                ("Name", "Ann".to_string()),
                ("Preferred Area", String::new())
            ]),
            "  Name:           Ann\n  Preferred Area:"
        );
    }

    #[test]
    fn test_dialog() {
        assert_eq!(
            console::strip_ansi_codes(&dialog(
                Dialog::Warning,
                "Select",
                "Select a flat first"
            )),
            "[warning] Select: Select a flat first"
        );
    }
}
