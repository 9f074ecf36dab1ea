//! Leave inbox for managers and HR.
//!
//! Each row is offered approve/reject according to the approval mirror. The
//! mirror only decides what is offered; every command is still judged by
//! the backend.

use sigep_adapters::models::{Aprobacion, Rechazo, Solicitud};
use sigep_adapters::{call, endpoints, execute, ApiRequest};
use tracing::info;

use super::{Level, Notices, ScreenContext};
use crate::errors::ConsoleError;
use crate::services::approval::{view_capability, ViewCapability};
use crate::services::attachments::Attachment;
use crate::services::validation;

pub const LOAD_FAILED: &str = "No se pudieron obtener las solicitudes del servidor.";
pub const APPROVE_FAILED: &str = "Error al procesar la aprobación";
pub const REJECT_FAILED: &str = "Error al registrar el rechazo";
pub const EVIDENCE_FAILED: &str = "Error al procesar el archivo PDF";

pub const MOTIVO_MAX: usize = 255;

/// Rejection being written for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectionDraft {
    pub solicitud: i64,
    pub motivo: String,
}

pub struct InboxScreen {
    ctx: ScreenContext,
    pub loading: bool,
    pub solicitudes: Vec<Solicitud>,
    pub rejection: Option<RejectionDraft>,
    pub notices: Notices,
}

impl InboxScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            loading: false,
            solicitudes: Vec::new(),
            rejection: None,
            notices: Notices::default(),
        }
    }

    pub async fn activate(&mut self) -> Result<(), ConsoleError> {
        self.loading = true;
        let gateway = self.ctx.gateway();
        let fetched = self
            .ctx
            .activation
            .guard(async {
                call::<Vec<Solicitud>, _>(gateway, ApiRequest::get(endpoints::SOLICITUDES))
                    .await
                    .map_err(ConsoleError::from)
            })
            .await;
        self.loading = false;

        match fetched {
            Ok(solicitudes) => {
                self.solicitudes = solicitudes;
                Ok(())
            }
            Err(ConsoleError::Cancelled) => Err(ConsoleError::Cancelled),
            Err(err) => {
                self.solicitudes.clear();
                Err(self.notices.fail(err, LOAD_FAILED))
            }
        }
    }

    pub fn capability(&self, solicitud: &Solicitud) -> ViewCapability {
        view_capability(self.ctx.session.roles(), &solicitud.estado_solicitud)
    }

    /// The listed request, provided the viewer holds its pending step.
    fn actionable(&self, id: i64) -> Result<&Solicitud, ConsoleError> {
        let solicitud = self
            .solicitudes
            .iter()
            .find(|solicitud| solicitud.id == id)
            .ok_or_else(|| ConsoleError::validation(format!("No existe la solicitud {id}")))?;
        if self.capability(solicitud).allows_action() {
            Ok(solicitud)
        } else {
            Err(ConsoleError::validation(format!(
                "La solicitud {id} no tiene acciones pendientes para su rol ({})",
                solicitud.estado_solicitud
            )))
        }
    }

    pub async fn approve(&mut self, id: i64) -> Result<(), ConsoleError> {
        let result = self.submit_approval(id).await;
        match result {
            Ok(()) => {
                self.notices
                    .push(Level::Success, "Solicitud procesada correctamente");
                self.activate().await
            }
            Err(err) => Err(self.notices.fail(err, APPROVE_FAILED)),
        }
    }

    async fn submit_approval(&self, id: i64) -> Result<(), ConsoleError> {
        self.actionable(id)?;
        let body = Aprobacion {
            ejecutado_por: self.ctx.session.employee_id()?,
        };
        let request = ApiRequest::put(endpoints::solicitud_aprobar(id), &body)?;
        let gateway = self.ctx.gateway();
        self.ctx
            .activation
            .guard(async { execute(gateway, request).await.map_err(ConsoleError::from) })
            .await?;
        info!(solicitud = id, ejecutado_por = body.ejecutado_por, "leave request approved");
        Ok(())
    }

    /// Starts a rejection draft, replacing any open one.
    pub fn open_rejection(&mut self, id: i64) {
        self.rejection = Some(RejectionDraft {
            solicitud: id,
            motivo: String::new(),
        });
    }

    pub fn set_motive(&mut self, motivo: impl Into<String>) {
        if let Some(draft) = self.rejection.as_mut() {
            draft.motivo = motivo.into();
        }
    }

    pub fn cancel_rejection(&mut self) {
        self.rejection = None;
    }

    /// Sends the open draft; it is discarded only when the backend accepts it.
    pub async fn confirm_rejection(&mut self) -> Result<(), ConsoleError> {
        let result = self.submit_rejection().await;
        match result {
            Ok(()) => {
                self.rejection = None;
                self.notices.push(Level::Info, "Solicitud rechazada");
                self.activate().await
            }
            Err(err) => Err(self.notices.fail(err, REJECT_FAILED)),
        }
    }

    async fn submit_rejection(&self) -> Result<(), ConsoleError> {
        let draft = self
            .rejection
            .as_ref()
            .ok_or_else(|| ConsoleError::validation("No hay un rechazo en curso"))?;
        if draft.motivo.trim().is_empty() {
            return Err(ConsoleError::validation("Debe indicar un motivo de rechazo"));
        }
        validation::max_chars(
            &draft.motivo,
            MOTIVO_MAX,
            "El motivo de rechazo admite hasta 255 caracteres",
        )?;
        self.actionable(draft.solicitud)?;

        let body = Rechazo {
            motivo: draft.motivo.clone(),
            ejecutado_por: self.ctx.session.employee_id()?,
        };
        let request = ApiRequest::put(endpoints::solicitud_rechazar(draft.solicitud), &body)?;
        let gateway = self.ctx.gateway();
        self.ctx
            .activation
            .guard(async { execute(gateway, request).await.map_err(ConsoleError::from) })
            .await?;
        info!(solicitud = draft.solicitud, "leave request rejected");
        Ok(())
    }

    pub fn evidence(&mut self, id: i64) -> Result<Attachment, ConsoleError> {
        let decoded = match self.solicitudes.iter().find(|solicitud| solicitud.id == id) {
            None => Err(ConsoleError::validation(format!("No existe la solicitud {id}"))),
            Some(solicitud) if !solicitud.has_evidence() => {
                Err(ConsoleError::validation("Sin archivo adjunto"))
            }
            Some(solicitud) => {
                Attachment::from_data_uri(solicitud.evidencia_base64.as_deref().unwrap_or_default())
            }
        };
        decoded.map_err(|err| self.notices.fail(err, EVIDENCE_FAILED))
    }
}
