//! Handler functions for the console subcommands.
//!
//! Each handler builds its screen from the stored session, drives it through
//! activation and the requested action, and prints the screen's notices.
//! Failures a screen already reported come back as [`Completion::Failed`];
//! anything returned as `Err` has not been shown yet.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, Utc};
use sigep_adapters::models::EstadoPersona;
use sigep_adapters::RemoteGateway;
use tracing::info;

use super::render;
use super::{AttendanceCommand, Command, PersonnelCommand, RequestsCommand, UsersCommand};
use crate::auth::{self, enforce, require_session, Credentials, Session, SessionStore};
use crate::errors::ConsoleError;
use crate::screens::attendance::AttendanceScreen;
use crate::screens::inbox::{InboxScreen, EVIDENCE_FAILED};
use crate::screens::my_requests::{LeaveForm, MyRequestsScreen};
use crate::screens::personnel::{CandidateForm, HireForm, PersonnelScreen};
use crate::screens::users::UsersScreen;
use crate::screens::{CancellationToken, Level, Notice, Notices, ScreenContext};
use crate::services::attachments::Attachment;

const CV_FAILED: &str = "No se pudo abrir la hoja de vida";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Done,
    /// The failure has already been shown.
    Failed,
}

pub struct App {
    gateway: Arc<dyn RemoteGateway>,
    store: Arc<dyn SessionStore>,
    session_ttl: chrono::Duration,
    activation: CancellationToken,
}

impl App {
    pub fn new(
        gateway: Arc<dyn RemoteGateway>,
        store: Arc<dyn SessionStore>,
        session_ttl: chrono::Duration,
    ) -> Self {
        Self {
            gateway,
            store,
            session_ttl,
            activation: CancellationToken::new(),
        }
    }

    /// Token shared by every screen this invocation activates.
    pub fn activation(&self) -> CancellationToken {
        self.activation.clone()
    }

    pub async fn run(&self, command: Command) -> Result<Completion, ConsoleError> {
        match command {
            Command::Login { username, password } => self.login(username, password).await,
            Command::Logout => {
                auth::logout(self.store.as_ref())?;
                println!("Sesión cerrada");
                Ok(Completion::Done)
            }
            Command::Menu => {
                render::menu(self.session()?.menus());
                Ok(Completion::Done)
            }
            Command::Personnel(command) => self.personnel(command).await,
            Command::Users(command) => self.users(command).await,
            Command::Requests(command) => self.requests(command).await,
            Command::Attendance(command) => self.attendance(command).await,
        }
    }

    fn session(&self) -> Result<Session, ConsoleError> {
        require_session(self.store.as_ref(), self.session_ttl, Utc::now())
    }

    fn context(&self) -> Result<ScreenContext, ConsoleError> {
        Ok(ScreenContext::new(self.gateway.clone(), self.session()?).with_activation(self.activation()))
    }

    /// Prints what the screen reported and tells whether to carry on.
    fn settle(&self, notices: &mut Notices, result: Result<(), ConsoleError>) -> bool {
        let result = enforce(self.store.as_ref(), result);
        render::notices(&notices.take());
        match result {
            Ok(()) => true,
            Err(ConsoleError::Cancelled) => {
                println!("Operación cancelada");
                false
            }
            Err(_) => false,
        }
    }

    async fn login(&self, username: String, password: String) -> Result<Completion, ConsoleError> {
        let credentials = Credentials { username, password };
        match auth::login(self.gateway.as_ref(), self.store.as_ref(), credentials, Utc::now()).await {
            Ok(session) => {
                render::welcome(&session);
                Ok(Completion::Done)
            }
            Err(err) => {
                let level = match err {
                    ConsoleError::Validation(_) => Level::Warning,
                    _ => Level::Error,
                };
                render::notices(&[Notice::new(level, auth::login_failure_message(&err))]);
                Ok(Completion::Failed)
            }
        }
    }

    async fn personnel(&self, command: PersonnelCommand) -> Result<Completion, ConsoleError> {
        let mut screen = PersonnelScreen::new(self.context()?);

        match command {
            PersonnelCommand::List { tab } => {
                let result = screen.activate().await;
                if !self.settle(&mut screen.notices, result) {
                    return Ok(Completion::Failed);
                }
                render::personnel(&screen, tab.into());
            }
            PersonnelCommand::Catalogs => {
                let result = screen.activate().await;
                if !self.settle(&mut screen.notices, result) {
                    return Ok(Completion::Failed);
                }
                render::catalog("Áreas", &screen.areas);
                render::catalog("Cargos", &screen.cargos);
                render::catalog("Roles", &screen.roles);
            }
            PersonnelCommand::Hire {
                candidate,
                code,
                start_date,
                salary,
                area,
                position,
                email,
                password,
                roles,
            } => {
                let result = screen.activate().await;
                if !self.settle(&mut screen.notices, result) {
                    return Ok(Completion::Failed);
                }
                let form = HireForm {
                    candidato_id: Some(candidate),
                    codigo_empleado: code,
                    fecha_contratacion: start_date,
                    salario: salary,
                    id_area: area,
                    id_cargo: position,
                    email_corporativo: email,
                    password,
                    roles,
                };
                let result = screen.hire(form).await;
                if !self.settle(&mut screen.notices, result) {
                    return Ok(Completion::Failed);
                }
                render::personnel(&screen, EstadoPersona::Empleado);
            }
            PersonnelCommand::Register {
                cedula,
                names,
                surnames,
                email,
                phone,
                birth_date,
                position,
                salary_aspiration,
                cv,
            } => {
                let form = CandidateForm {
                    cedula,
                    nombres: names,
                    apellidos: surnames,
                    correo: email,
                    telefono: phone,
                    fecha_nacimiento: birth_date,
                    id_cargo: position,
                    aspiracion_salarial: salary_aspiration,
                    hoja_vida: cv.as_deref().map(Attachment::from_file).transpose()?,
                };
                let result = screen.register_candidate(form).await;
                if !self.settle(&mut screen.notices, result) {
                    return Ok(Completion::Failed);
                }
                render::personnel(&screen, EstadoPersona::Candidato);
            }
            PersonnelCommand::Cv { id, out } => {
                let result = screen.activate().await;
                if !self.settle(&mut screen.notices, result) {
                    return Ok(Completion::Failed);
                }
                let saved = screen
                    .candidate_cv(id)
                    .and_then(|cv| save(&cv, out, "cv", id))
                    .map_err(|err| screen.notices.fail(err, CV_FAILED));
                match saved {
                    Ok(path) => println!("Hoja de vida guardada en {}", path.display()),
                    Err(err) => {
                        self.settle(&mut screen.notices, Err(err));
                        return Ok(Completion::Failed);
                    }
                }
            }
        }
        Ok(Completion::Done)
    }

    async fn users(&self, command: UsersCommand) -> Result<Completion, ConsoleError> {
        let mut screen = UsersScreen::new(self.context()?);

        match command {
            UsersCommand::List => {
                let result = screen.activate().await;
                if !self.settle(&mut screen.notices, result) {
                    return Ok(Completion::Failed);
                }
            }
            UsersCommand::Toggle { id } => {
                let result = screen.activate().await;
                if !self.settle(&mut screen.notices, result) {
                    return Ok(Completion::Failed);
                }
                let result = screen.toggle(id).await;
                if !self.settle(&mut screen.notices, result) {
                    return Ok(Completion::Failed);
                }
            }
            UsersCommand::ResetPassword { id, password } => {
                let result = screen.reset_password(id, &password).await;
                let settled = self.settle(&mut screen.notices, result);
                return Ok(if settled { Completion::Done } else { Completion::Failed });
            }
        }
        render::users(&screen.usuarios);
        Ok(Completion::Done)
    }

    async fn requests(&self, command: RequestsCommand) -> Result<Completion, ConsoleError> {
        let ctx = self.context()?;

        if let RequestsCommand::Mine | RequestsCommand::New { .. } = command {
            let mut screen = MyRequestsScreen::new(ctx);
            let result = match command {
                RequestsCommand::New {
                    kind,
                    from,
                    to,
                    motive,
                    evidence,
                } => {
                    let form = LeaveForm {
                        tipo: kind,
                        inicio: from,
                        fin: to,
                        motivo: motive,
                        evidencia: evidence.as_deref().map(Attachment::from_file).transpose()?,
                    };
                    screen.create(form).await
                }
                _ => screen.activate().await,
            };
            if !self.settle(&mut screen.notices, result) {
                return Ok(Completion::Failed);
            }
            render::own_requests(&screen.solicitudes);
            return Ok(Completion::Done);
        }

        let mut screen = InboxScreen::new(ctx);
        let result = screen.activate().await;
        if !self.settle(&mut screen.notices, result) {
            return Ok(Completion::Failed);
        }

        let result = match command {
            RequestsCommand::Approve { id } => screen.approve(id).await,
            RequestsCommand::Reject { id, motive } => {
                screen.open_rejection(id);
                screen.set_motive(motive);
                screen.confirm_rejection().await
            }
            RequestsCommand::Evidence { id, out } => {
                let saved = match screen.evidence(id) {
                    Ok(evidence) => save(&evidence, out, "evidencia", id)
                        .map_err(|err| screen.notices.fail(err, EVIDENCE_FAILED)),
                    Err(err) => Err(err),
                };
                match saved {
                    Ok(path) => {
                        println!("Evidencia guardada en {}", path.display());
                        return Ok(Completion::Done);
                    }
                    Err(err) => Err(err),
                }
            }
            _ => Ok(()),
        };
        if !self.settle(&mut screen.notices, result) {
            return Ok(Completion::Failed);
        }
        render::inbox(&screen);
        Ok(Completion::Done)
    }

    async fn attendance(&self, command: AttendanceCommand) -> Result<Completion, ConsoleError> {
        let today = Local::now().date_naive();
        let mut screen = AttendanceScreen::new(self.context()?, today);

        match command {
            AttendanceCommand::Show { from, to } => {
                if from.is_some() || to.is_some() {
                    let inicio = from.unwrap_or_else(|| screen.range.0.date());
                    let result = screen.set_range(inicio, to.unwrap_or(today));
                    if !self.settle(&mut screen.notices, result) {
                        return Ok(Completion::Failed);
                    }
                }
                let result = screen.activate().await;
                if !self.settle(&mut screen.notices, result) {
                    return Ok(Completion::Failed);
                }
            }
            AttendanceCommand::Punch { kind, lat, lon } => {
                let result = screen.activate().await;
                if !self.settle(&mut screen.notices, result) {
                    return Ok(Completion::Failed);
                }
                let result = screen.punch(kind, lat.zip(lon)).await;
                if !self.settle(&mut screen.notices, result) {
                    return Ok(Completion::Failed);
                }
            }
        }
        render::attendance(&screen);
        Ok(Completion::Done)
    }
}

/// Writes a decoded attachment, defaulting to `{prefix}-{id}.{ext}` in the
/// working directory.
fn save(attachment: &Attachment, out: Option<PathBuf>, prefix: &str, id: i64) -> Result<PathBuf, ConsoleError> {
    let path = out.unwrap_or_else(|| PathBuf::from(format!("{prefix}-{id}.{}", attachment.extension())));
    attachment.write_to(&path)?;
    info!(path = %path.display(), bytes = attachment.bytes.len(), "attachment saved");
    Ok(path)
}
