// Dialogue Calendar
// Command line entry point

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};

use dialogue_calendar::models::event::EventRecord;
use dialogue_calendar::models::language::Language;
use dialogue_calendar::models::settings::AppConfig;
use dialogue_calendar::models::time_slot::TimeSlot;
use dialogue_calendar::services::calendar::{CalendarService, MonthView};
use dialogue_calendar::services::dialogue::ConfirmOverwrite;
use dialogue_calendar::services::grid;
use dialogue_calendar::services::session::{EditSession, SessionHandle};
use dialogue_calendar::services::settings::SettingsStore;
use dialogue_calendar::services::workspace::Workspace;
use dialogue_calendar::utils::date::{month_abbrev, parse_month, parse_weekday, WEEKDAY_NAMES};

#[derive(Parser)]
#[command(name = "dialogue-calendar")]
#[command(about = "Schedule dialogue files on a yearly calendar")]
struct Cli {
    /// Workspace root holding eventlist.csv, KR/ and EN/
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Year used for month lengths (defaults to the current year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Overwrite existing dialogue files without asking
    #[arg(long)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the month folders under KR/
    Folders,
    /// Print a month grid
    Month {
        /// Month abbreviation or number
        month: String,

        /// Weekday of the first column, e.g. "Mon"
        #[arg(long)]
        start_day: Option<String>,
    },
    /// List events
    List {
        /// Only events in this month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Add an event
    Add {
        #[arg(long)]
        month: String,

        #[arg(long)]
        day: u32,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Change an event, moving its dialogue files if the date or name changed
    Edit {
        id: i64,

        #[command(flatten)]
        fields: EventFields,
    },
    /// Delete an event and both dialogue files
    Delete { id: i64 },
    /// Copy an event's KR dialogue over its EN dialogue
    Copy { id: i64 },
    /// Create a dialogue variant if missing and print its path
    Open {
        id: i64,

        /// KR or EN
        #[arg(short, long, default_value = "KR")]
        lang: String,
    },
}

/// Optional field values applied to an edit session.
#[derive(Args)]
struct EventFields {
    /// Month abbreviation or number (edit only)
    #[arg(long)]
    to_month: Option<String>,

    /// Day of month (edit only)
    #[arg(long)]
    to_day: Option<String>,

    #[arg(long)]
    weekday_label: Option<String>,

    #[arg(long)]
    time: Option<String>,

    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    conditions: Option<String>,

    /// Dialogue file name, with or without .json
    #[arg(long)]
    file: Option<String>,

    #[arg(long)]
    desc: Option<String>,
}

impl EventFields {
    fn apply_to(&self, session: &mut EditSession) {
        if let Some(month) = &self.to_month {
            session.set_month(month);
        }
        if let Some(day) = &self.to_day {
            session.set_day(day);
        }
        if let Some(label) = &self.weekday_label {
            session.set_weekday_label(label.as_str());
        }
        if let Some(time) = &self.time {
            session.set_time_slot(TimeSlot::parse(time));
        }
        if let Some(location) = &self.location {
            session.set_location(location.as_str());
        }
        if let Some(conditions) = &self.conditions {
            session.set_conditions(conditions.as_str());
        }
        if let Some(file) = &self.file {
            session.set_file_name(file.as_str());
        }
        if let Some(desc) = &self.desc {
            session.set_description(desc.as_str());
        }
    }
}

/// Overwrite confirmation for the terminal.
enum TerminalConfirm {
    Always,
    Prompt,
}

impl ConfirmOverwrite for TerminalConfirm {
    fn confirm_overwrite(&self, path: &Path) -> bool {
        match self {
            TerminalConfirm::Always => true,
            TerminalConfirm::Prompt => {
                print!("{} already exists. Overwrite? [y/N] ", path.display());
                if io::stdout().flush().is_err() {
                    return false;
                }
                let mut answer = String::new();
                match io::stdin().lock().read_line(&mut answer) {
                    Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
                    Err(e) => {
                        log::warn!("Failed to read confirmation: {}", e);
                        false
                    }
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    log::info!("Starting Dialogue Calendar in {:?}", cli.root);

    let mut config = AppConfig::new(&cli.root);
    if let Some(year) = cli.year {
        config = config.with_year(year);
    }

    let confirm = if cli.yes {
        TerminalConfirm::Always
    } else {
        TerminalConfirm::Prompt
    };

    let (settings, settings_store) = match SettingsStore::at_default_location() {
        Ok(store) => (store.load(), Some(store)),
        Err(e) => {
            log::warn!("Settings will not be persisted: {:#}", e);
            (Default::default(), None)
        }
    };

    let mut service = CalendarService::new(config, settings, confirm);
    if let Some(store) = settings_store {
        service = service.with_settings_store(store);
    }

    match cli.command {
        Commands::Folders => folders(&cli.root),
        Commands::Month { month, start_day } => {
            let start_day = start_day
                .map(|text| parse_weekday(&text).ok_or_else(|| anyhow!("Unknown weekday {:?}", text)))
                .transpose()?;
            let view = service.show_month(&month, start_day)?;
            print_month(&view);
            Ok(())
        }
        Commands::List { month } => {
            let month = month.map(|text| month_number(&text)).transpose()?;
            for record in service.list(month)? {
                print_record(&record);
            }
            Ok(())
        }
        Commands::Add { month, day, fields } => {
            let (mut session, handle) = service.begin_add(month_number(&month)?, day)?;
            fields.apply_to(&mut session);
            session.save(service.sync())?;
            let outcome = service.complete(handle).await?;
            println!("{}", outcome);
            Ok(())
        }
        Commands::Edit { id, fields } => {
            let (mut session, handle) = begin_edit(&service, id)?;
            fields.apply_to(&mut session);
            if let Some(report) = session.save(service.sync())? {
                for (lang, action) in &report.actions {
                    println!("{}: {:?}", lang, action);
                }
            }
            let outcome = service.complete(handle).await?;
            println!("{}", outcome);
            Ok(())
        }
        Commands::Delete { id } => {
            let (mut session, handle) = begin_edit(&service, id)?;
            session.delete();
            let outcome = service.complete(handle).await?;
            println!("{}", outcome);
            Ok(())
        }
        Commands::Copy { id } => {
            let (session, _handle) = begin_edit(&service, id)?;
            let action = session.copy_kr_to_en(service.sync())?;
            println!("{:?}", action);
            Ok(())
        }
        Commands::Open { id, lang } => {
            let lang = Language::parse(&lang).ok_or_else(|| anyhow!("Unknown language {:?}", lang))?;
            let (session, _handle) = begin_edit(&service, id)?;
            let (path, created) = session.open_variant(lang, service.sync())?;
            if created {
                log::info!("Created empty dialogue {:?}", path);
            }
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn begin_edit<C: ConfirmOverwrite>(
    service: &CalendarService<C>,
    id: i64,
) -> Result<(EditSession, SessionHandle)> {
    service
        .begin_edit(id)?
        .ok_or_else(|| anyhow!("No event with id {}", id))
}

fn month_number(text: &str) -> Result<u32> {
    parse_month(text).ok_or_else(|| anyhow!("Unknown month {:?}", text))
}

fn folders(root: &Path) -> Result<()> {
    let workspace = Workspace::open(root)?;
    for folder in workspace.month_folders() {
        println!("{:>2} {}", folder.month, folder.name);
    }
    Ok(())
}

fn print_month(view: &MonthView) {
    println!("{} {}", view.abbrev, view.year);
    let header: Vec<&str> = WEEKDAY_NAMES.iter().map(|name| &name[..3]).collect();
    println!("{}", header.join("  "));

    for week in grid::weeks(&view.days) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match (cell.day_number, cell.events.len()) {
                (0, _) => "   ".to_string(),
                (day, 0) => format!("{:>3}", day),
                (day, _) => format!("{:>2}*", day),
            })
            .collect();
        println!("{}", row.join("  "));
    }

    for cell in view.days.iter().filter(|cell| !cell.events.is_empty()) {
        for record in &cell.events {
            print_record(record);
        }
    }
}

fn print_record(record: &EventRecord) {
    let kr = if record.dialogue_exists(Language::Kr) { "KR" } else { "--" };
    let en = if record.dialogue_exists(Language::En) { "EN" } else { "--" };
    println!(
        "{:>4}  {} {:>2}  {:<9} {:<10} {:<12} {} {}  {}  {}",
        record.id,
        month_abbrev(record.month).unwrap_or("?"),
        record.day,
        record.weekday_label,
        record.time_slot,
        record.location,
        kr,
        en,
        record.file_base(),
        record.description
    );
}
