//! Command-line surface of the console.
//!
//! Subcommands mirror the screens: each one activates its screen, performs
//! at most one action, and prints the resulting state.

pub mod handlers;
pub mod render;

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use sigep_adapters::models::{EstadoPersona, TipoPermiso, TipoTimbrada};

pub use handlers::{App, Completion};

#[derive(Parser, Debug)]
#[command(name = "sigep", author, version, about)]
pub struct Cli {
    /// Backend base address, overrides SIGEP_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open a session against the backend.
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "SIGEP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Discard the stored session.
    Logout,
    /// Show the navigation menu granted to the session.
    Menu,
    #[command(subcommand)]
    Personnel(PersonnelCommand),
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Requests(RequestsCommand),
    #[command(subcommand)]
    Attendance(AttendanceCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tab {
    Empleados,
    Candidatos,
    Rechazados,
}

impl From<Tab> for EstadoPersona {
    fn from(tab: Tab) -> Self {
        match tab {
            Tab::Empleados => EstadoPersona::Empleado,
            Tab::Candidatos => EstadoPersona::Candidato,
            Tab::Rechazados => EstadoPersona::Rechazado,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum PersonnelCommand {
    /// List people of one tab with the per-tab counts.
    List {
        #[arg(long, value_enum, default_value_t = Tab::Empleados)]
        tab: Tab,
    },
    /// List areas, positions and roles with their ids.
    Catalogs,
    /// Promote an applicant to employee and create their login.
    Hire {
        #[arg(long)]
        candidate: i64,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// Defaults to the applicant's salary aspiration.
        #[arg(long)]
        salary: Option<f64>,
        #[arg(long)]
        area: Option<i64>,
        #[arg(long)]
        position: Option<i64>,
        /// Defaults to the applicant's personal email.
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "SIGEP_TEMP_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        #[arg(long = "role")]
        roles: Vec<i64>,
    },
    /// Register a new applicant.
    Register {
        #[arg(long)]
        cedula: Option<String>,
        #[arg(long)]
        names: Option<String>,
        #[arg(long)]
        surnames: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        birth_date: Option<NaiveDate>,
        #[arg(long)]
        position: Option<i64>,
        #[arg(long)]
        salary_aspiration: Option<f64>,
        /// CV in PDF format.
        #[arg(long)]
        cv: Option<PathBuf>,
    },
    /// Save an applicant's CV to a file.
    Cv {
        id: i64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List,
    /// Lock an active account or unlock a locked one.
    Toggle { id: i64 },
    ResetPassword {
        id: i64,
        #[arg(long, env = "SIGEP_NEW_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum RequestsCommand {
    /// Leave requests awaiting manager or HR action.
    Inbox,
    Approve { id: i64 },
    Reject {
        id: i64,
        #[arg(long, default_value = "")]
        motive: String,
    },
    /// Save the evidence attached to a request.
    Evidence {
        id: i64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// The session employee's own requests.
    Mine,
    New {
        #[arg(long)]
        kind: Option<TipoPermiso>,
        /// Start, as YYYY-MM-DDTHH:MM:SS.
        #[arg(long)]
        from: Option<NaiveDateTime>,
        /// End, as YYYY-MM-DDTHH:MM:SS.
        #[arg(long)]
        to: Option<NaiveDateTime>,
        #[arg(long)]
        motive: Option<String>,
        #[arg(long)]
        evidence: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AttendanceCommand {
    /// Daily summary and the punches available now.
    Show {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    Punch {
        kind: TipoTimbrada,
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
}
