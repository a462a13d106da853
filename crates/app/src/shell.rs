use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    str::FromStr,
};

use log::{debug, error, trace};
use realty_domain::{
    Client, ClientForm, ClientService, CreateError, DeleteError, Flat, FlatForm, FlatService,
    Form, Panel, ReadError, RecordManager, ReportService, Row, StorageError, UpdateError,
};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::{
    chart,
    render::{self, Dialog},
};

const HELP: &str = "\
Commands:
  help                    show this help
  tab flats|clients|charts
  1 | 2 | 3               switch to the flats, clients or charts tab
  log                     show the most recent log messages
  quit                    leave

Flats and clients tabs:
  list                    reload and show the list
  select <row>            select a row and load it into the form
  unselect                clear the selection
  form                    show the form
  set <field> <value>     change a field of the form
  clear                   reset the form
  add                     add the form as a new record
  update                  replace the selected record with the form
  delete                  delete the selected record

Charts tab:
  chart [PATH]            draw the availability of flats as SVG";

#[derive(Debug, Display, EnumString, EnumIter, Clone, Copy, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
pub enum Tab {
    #[strum(to_string = "flats", serialize = "1")]
    Flats,
    #[strum(to_string = "clients", serialize = "2")]
    Clients,
    #[strum(to_string = "charts", serialize = "3")]
    Charts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Help,
    Tab(Tab),
    Log,
    Quit,
    Chart(Option<PathBuf>),
    Panel(PanelCommand),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PanelCommand {
    List,
    Select(usize),
    Unselect,
    Form,
    Set { field: String, value: String },
    Clear,
    Add,
    Update,
    Delete,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (type 'help' for a list of commands)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, rest)| (name, rest.trim()));
        match name {
            "" => Err(CommandError::Empty),
            "help" | "?" => Ok(Command::Help),
            "tab" => rest
                .parse()
                .map(Command::Tab)
                .map_err(|_| CommandError::Usage("tab flats|clients|charts")),
            "1" | "2" | "3" => name
                .parse()
                .map(Command::Tab)
                .map_err(|_| CommandError::Unknown(name.to_string())),
            "log" => Ok(Command::Log),
            "quit" | "exit" => Ok(Command::Quit),
            "chart" => Ok(Command::Chart(
                (!rest.is_empty()).then(|| PathBuf::from(rest)),
            )),
            "list" => Ok(Command::Panel(PanelCommand::List)),
            "select" => rest
                .parse::<usize>()
                .ok()
                .filter(|row| *row > 0)
                .map(|row| Command::Panel(PanelCommand::Select(row)))
                .ok_or(CommandError::Usage("select <row>")),
            "unselect" => Ok(Command::Panel(PanelCommand::Unselect)),
            "form" => Ok(Command::Panel(PanelCommand::Form)),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(field, value)| (field, value.trim()));
                if field.is_empty() {
                    return Err(CommandError::Usage("set <field> <value>"));
                }
                Ok(Command::Panel(PanelCommand::Set {
                    field: field.to_lowercase(),
                    value: value.to_string(),
                }))
            }
            "clear" => Ok(Command::Panel(PanelCommand::Clear)),
            "add" => Ok(Command::Panel(PanelCommand::Add)),
            "update" => Ok(Command::Panel(PanelCommand::Update)),
            "delete" => Ok(Command::Panel(PanelCommand::Delete)),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

/// Interactive front end with one tab per panel.
pub struct Shell<S, W> {
    service: S,
    output: W,
    chart_path: PathBuf,
    tab: Tab,
    flats: Panel<FlatForm>,
    clients: Panel<ClientForm>,
}

impl<S, W> Shell<S, W>
where
    S: FlatService + ClientService + ReportService,
    W: Write,
{
    pub fn new(service: S, output: W, chart_path: PathBuf) -> Self {
        let mut flats = Panel::new();
        flats.on_selection_changed(|flat: &Flat| debug!("selected flat {}", flat.id));
        let mut clients = Panel::new();
        clients.on_selection_changed(|client: &Client| debug!("selected client {}", client.id));
        Self {
            service,
            output,
            chart_path,
            tab: Tab::Flats,
            flats,
            clients,
        }
    }

    #[cfg(test)]
    fn tab(&self) -> Tab {
        self.tab
    }

    /// Read commands line by line until `quit` or the end of the input.
    pub fn run(&mut self, mut input: impl BufRead) -> io::Result<()> {
        self.refresh()?;
        self.show_tab()?;

        let mut line = String::new();
        loop {
            write!(self.output, "{}> ", self.tab)?;
            self.output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }
            trace!("command: {}", line.trim());

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command)?,
                Err(CommandError::Empty) => {}
                Err(err) => {
                    writeln!(
                        self.output,
                        "{}",
                        render::dialog(Dialog::Error, "Command", &err.to_string())
                    )?;
                }
            }
        }

        Ok(())
    }

    fn refresh(&mut self) -> io::Result<()> {
        if let Err(err) = self.flats.refresh(&self.service) {
            writeln!(self.output, "{}", read_error_dialog(Flat::ENTITY, &err))?;
        }
        if let Err(err) = self.clients.refresh(&self.service) {
            writeln!(self.output, "{}", read_error_dialog(Client::ENTITY, &err))?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Help => writeln!(self.output, "{HELP}"),
            Command::Tab(tab) => {
                self.tab = tab;
                self.show_tab()
            }
            Command::Log => self.show_log(),
            Command::Quit => Ok(()),
            Command::Chart(path) => {
                if self.tab == Tab::Charts {
                    self.show_chart(path)
                } else {
                    self.unavailable("chart")
                }
            }
            Command::Panel(command) => match self.tab {
                Tab::Flats => execute(&mut self.flats, &self.service, &mut self.output, command),
                Tab::Clients => {
                    execute(&mut self.clients, &self.service, &mut self.output, command)
                }
                Tab::Charts => self.unavailable("this command"),
            },
        }
    }

    fn unavailable(&mut self, what: &str) -> io::Result<()> {
        let tabs = Tab::iter()
            .filter(|tab| *tab != self.tab)
            .map(|tab| tab.to_string())
            .collect::<Vec<_>>()
            .join(" or ");
        writeln!(
            self.output,
            "{}",
            render::dialog(
                Dialog::Info,
                "Tab",
                &format!("{what} is not available on the {} tab, switch to {tabs}", self.tab)
            )
        )
    }

    fn show_tab(&mut self) -> io::Result<()> {
        match self.tab {
            Tab::Flats => writeln!(self.output, "{}", render::table(self.flats.presenter())),
            Tab::Clients => writeln!(self.output, "{}", render::table(self.clients.presenter())),
            Tab::Charts => writeln!(
                self.output,
                "Use 'chart [PATH]' to draw the availability of flats (default: {})",
                self.chart_path.display()
            ),
        }
    }

    fn show_log(&mut self) -> io::Result<()> {
        let entries = crate::log::entries();
        if entries.is_empty() {
            return writeln!(self.output, "  (no log messages)");
        }
        for entry in entries {
            writeln!(
                self.output,
                "  {} {:<5} {}",
                entry.time, entry.level, entry.message
            )?;
        }
        Ok(())
    }

    fn show_chart(&mut self, path: Option<PathBuf>) -> io::Result<()> {
        let path = path.unwrap_or_else(|| self.chart_path.clone());
        let counts = match self.service.get_status_counts() {
            Ok(counts) => counts,
            Err(err) => {
                return writeln!(self.output, "{}", read_error_dialog(Flat::ENTITY, &err));
            }
        };

        for (label, count) in counts.iter() {
            writeln!(
                self.output,
                "  {label}: {count} ({:.1}%)",
                counts.percentage(count)
            )?;
        }

        match chart::pie(&counts).and_then(|svg| std::fs::write(&path, svg).map_err(Into::into)) {
            Ok(()) => {
                debug!("wrote chart to {}", path.display());
                writeln!(
                    self.output,
                    "{}",
                    render::dialog(
                        Dialog::Info,
                        chart::TITLE,
                        &format!("Saved to {}", path.display())
                    )
                )
            }
            Err(err) => {
                error!("failed to draw chart: {err}");
                writeln!(
                    self.output,
                    "{}",
                    render::dialog(Dialog::Error, "Chart", &err.to_string())
                )
            }
        }
    }
}

fn execute<F, M, W>(
    panel: &mut Panel<F>,
    manager: &M,
    output: &mut W,
    command: PanelCommand,
) -> io::Result<()>
where
    F: Form,
    M: RecordManager<F>,
    W: Write,
{
    let entity = F::Record::ENTITY;
    match command {
        PanelCommand::List => match panel.refresh(manager) {
            Ok(()) => writeln!(output, "{}", render::table(panel.presenter())),
            Err(err) => writeln!(output, "{}", read_error_dialog(entity, &err)),
        },
        PanelCommand::Select(row) => match panel.select(row - 1) {
            Ok(()) => writeln!(output, "{}", render::form(&panel.form.values())),
            Err(err) => writeln!(
                output,
                "{}",
                render::dialog(Dialog::Warning, "Select", &err.to_string())
            ),
        },
        PanelCommand::Unselect => {
            panel.clear_selection();
            writeln!(output, "{}", render::table(panel.presenter()))
        }
        PanelCommand::Form => writeln!(output, "{}", render::form(&panel.form.values())),
        PanelCommand::Set { field, value } => match panel.form.set(&field, &value) {
            Ok(()) => writeln!(output, "{}", render::form(&panel.form.values())),
            Err(err) => writeln!(
                output,
                "{}",
                render::dialog(Dialog::Error, "Invalid", &err.to_string())
            ),
        },
        PanelCommand::Clear => {
            panel.clear_form();
            writeln!(output, "{}", render::form(&panel.form.values()))
        }
        PanelCommand::Add => match panel.add(manager) {
            Ok(_) => writeln!(output, "{}", render::table(panel.presenter())),
            Err(CreateError::Validation(err)) => writeln!(
                output,
                "{}",
                render::dialog(Dialog::Error, "Invalid", &err.to_string())
            ),
            Err(CreateError::Storage(err)) => writeln!(output, "{}", storage_error_dialog(&err)),
        },
        PanelCommand::Update => match panel.update(manager) {
            Ok(_) => writeln!(output, "{}", render::table(panel.presenter())),
            Err(UpdateError::NoSelection) => writeln!(output, "{}", no_selection_dialog(entity)),
            Err(UpdateError::NotFound) => writeln!(output, "{}", not_found_dialog(entity)),
            Err(UpdateError::Validation(err)) => writeln!(
                output,
                "{}",
                render::dialog(Dialog::Error, "Invalid", &err.to_string())
            ),
            Err(UpdateError::Storage(err)) => writeln!(output, "{}", storage_error_dialog(&err)),
        },
        PanelCommand::Delete => match panel.delete(manager) {
            Ok(_) => writeln!(output, "{}", render::table(panel.presenter())),
            Err(DeleteError::NoSelection) => writeln!(output, "{}", no_selection_dialog(entity)),
            Err(DeleteError::NotFound) => writeln!(output, "{}", not_found_dialog(entity)),
            Err(DeleteError::Storage(err)) => writeln!(output, "{}", storage_error_dialog(&err)),
        },
    }
}

fn read_error_dialog(entity: &str, err: &ReadError) -> String {
    match err {
        ReadError::NoData => render::dialog(
            Dialog::Warning,
            "No Data",
            &format!("No {entity}s data available"),
        ),
        ReadError::Storage(err) => storage_error_dialog(err),
    }
}

fn storage_error_dialog(err: &StorageError) -> String {
    render::dialog(Dialog::Error, "Database", &err.to_string())
}

fn no_selection_dialog(entity: &str) -> String {
    render::dialog(
        Dialog::Warning,
        "Select",
        &format!("Select a {entity} first"),
    )
}

fn not_found_dialog(entity: &str) -> String {
    render::dialog(
        Dialog::Warning,
        "Not Found",
        &format!("The selected {entity} does not exist anymore"),
    )
}
