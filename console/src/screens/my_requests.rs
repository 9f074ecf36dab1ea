//! The employee's own leave requests.

use chrono::NaiveDateTime;
use sigep_adapters::models::{NuevaSolicitud, Solicitud, TipoPermiso};
use sigep_adapters::{call, endpoints, execute, ApiRequest};
use tracing::info;

use super::{Level, Notices, ScreenContext};
use crate::errors::ConsoleError;
use crate::services::attachments::Attachment;
use crate::services::validation;

pub const LOAD_FAILED: &str = "Error al cargar solicitudes";
pub const CREATE_FAILED: &str = "No se pudo crear la solicitud";

#[derive(Debug, Clone, Default)]
pub struct LeaveForm {
    pub tipo: Option<TipoPermiso>,
    pub inicio: Option<NaiveDateTime>,
    pub fin: Option<NaiveDateTime>,
    pub motivo: Option<String>,
    pub evidencia: Option<Attachment>,
}

pub struct MyRequestsScreen {
    ctx: ScreenContext,
    pub loading: bool,
    pub solicitudes: Vec<Solicitud>,
    pub notices: Notices,
}

impl MyRequestsScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            loading: false,
            solicitudes: Vec::new(),
            notices: Notices::default(),
        }
    }

    pub async fn activate(&mut self) -> Result<(), ConsoleError> {
        self.loading = true;
        let fetched = self.fetch().await;
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

    async fn fetch(&self) -> Result<Vec<Solicitud>, ConsoleError> {
        let request = ApiRequest::get(endpoints::solicitudes_empleado(self.ctx.session.employee_id()?));
        let gateway = self.ctx.gateway();
        self.ctx
            .activation
            .guard(async { call(gateway, request).await.map_err(ConsoleError::from) })
            .await
    }

    pub async fn create(&mut self, form: LeaveForm) -> Result<(), ConsoleError> {
        let result = self.submit(form).await;
        match result {
            Ok(()) => {
                self.notices.push(Level::Success, "Solicitud enviada");
                self.activate().await
            }
            Err(err) => Err(self.notices.fail(err, CREATE_FAILED)),
        }
    }

    async fn submit(&self, form: LeaveForm) -> Result<(), ConsoleError> {
        let tipo = validation::required_value(form.tipo, "Selecciona el tipo de permiso")?;
        let fecha_inicio = validation::required_value(form.inicio, "Indica la fecha y hora de inicio")?;
        let fecha_fin = validation::required_value(form.fin, "Indica la fecha y hora de fin")?;
        if fecha_fin < fecha_inicio {
            return Err(ConsoleError::validation(
                "La fecha de fin no puede ser anterior a la de inicio",
            ));
        }
        let motivo = validation::required(form.motivo.as_deref(), "Indica el motivo o justificación")?;

        let body = NuevaSolicitud {
            id_empleado: self.ctx.session.employee_id()?,
            tipo,
            fecha_inicio,
            fecha_fin,
            motivo,
            evidencia_base64: form
                .evidencia
                .as_ref()
                .map(Attachment::to_data_uri)
                .unwrap_or_default(),
        };
        let request = ApiRequest::post(endpoints::SOLICITUDES, &body)?;
        let gateway = self.ctx.gateway();
        self.ctx
            .activation
            .guard(async { execute(gateway, request).await.map_err(ConsoleError::from) })
            .await?;
        info!(id_empleado = body.id_empleado, tipo = tipo.code(), "leave request submitted");
        Ok(())
    }
}
