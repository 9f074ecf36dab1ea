//! The employee's attendance panel: punch history and the punch clock.

use chrono::{NaiveDate, NaiveDateTime};
use sigep_adapters::models::{local_seconds, NuevaTimbrada, Timbrada, TipoTimbrada};
use sigep_adapters::{call, endpoints, execute, ApiRequest};
use tracing::info;

use super::{Level, Notices, ScreenContext};
use crate::errors::ConsoleError;
use crate::services::attendance::{self, DailySummary};

pub const LOAD_FAILED: &str = "Error al sincronizar datos";
pub const PUNCH_FAILED: &str = "Error al registrar";
pub const OBSERVACION: &str = "Marcación desde Portal Web";

pub struct AttendanceScreen {
    ctx: ScreenContext,
    today: NaiveDate,
    pub loading: bool,
    pub range: (NaiveDateTime, NaiveDateTime),
    pub timbradas: Vec<Timbrada>,
    pub notices: Notices,
}

impl AttendanceScreen {
    /// `today` anchors both the default range and the punch clock.
    pub fn new(ctx: ScreenContext, today: NaiveDate) -> Self {
        Self {
            ctx,
            today,
            loading: false,
            range: attendance::default_range(today),
            timbradas: Vec::new(),
            notices: Notices::default(),
        }
    }

    /// Whole days from `inicio` through `fin`.
    pub fn set_range(&mut self, inicio: NaiveDate, fin: NaiveDate) -> Result<(), ConsoleError> {
        if fin < inicio {
            let err = ConsoleError::validation("La fecha de fin no puede ser anterior a la de inicio");
            return Err(self.notices.fail(err, LOAD_FAILED));
        }
        self.range = (attendance::start_of(inicio), attendance::end_of(fin));
        Ok(())
    }

    pub async fn activate(&mut self) -> Result<(), ConsoleError> {
        self.loading = true;
        let fetched = self.fetch().await;
        self.loading = false;

        match fetched {
            Ok(timbradas) => {
                self.timbradas = timbradas;
                Ok(())
            }
            Err(ConsoleError::Cancelled) => Err(ConsoleError::Cancelled),
            Err(err) => {
                self.timbradas.clear();
                Err(self.notices.fail(err, LOAD_FAILED))
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<Timbrada>, ConsoleError> {
        let (inicio, fin) = self.range;
        let request = ApiRequest::get(endpoints::timbradas_empleado(self.ctx.session.employee_id()?))
            .with_query("inicio", local_seconds::format(&inicio))
            .with_query("fin", local_seconds::format(&fin));
        let gateway = self.ctx.gateway();
        self.ctx
            .activation
            .guard(async { call(gateway, request).await.map_err(ConsoleError::from) })
            .await
    }

    pub fn summary(&self) -> Vec<DailySummary> {
        attendance::summarize(&self.timbradas)
    }

    pub fn latest_today(&self) -> Option<&Timbrada> {
        attendance::latest_on(&self.timbradas, self.today)
    }

    /// Punch kinds offered right now.
    pub fn eligible(&self) -> &'static [TipoTimbrada] {
        attendance::allowed_next(self.latest_today().map(|punch| punch.tipo))
    }

    pub async fn punch(
        &mut self,
        tipo: TipoTimbrada,
        coordinates: Option<(f64, f64)>,
    ) -> Result<(), ConsoleError> {
        let result = self.submit_punch(tipo, coordinates).await;
        match result {
            Ok(()) => {
                self.notices.push(Level::Success, "Registro Exitoso");
                self.activate().await
            }
            Err(err) => Err(self.notices.fail(err, PUNCH_FAILED)),
        }
    }

    async fn submit_punch(
        &self,
        tipo: TipoTimbrada,
        coordinates: Option<(f64, f64)>,
    ) -> Result<(), ConsoleError> {
        if !self.eligible().contains(&tipo) {
            let offered: Vec<&str> = self.eligible().iter().map(|t| t.code()).collect();
            let offered = if offered.is_empty() {
                "ninguna".to_string()
            } else {
                offered.join(", ")
            };
            return Err(ConsoleError::validation(format!(
                "No corresponde registrar {} ahora (disponible: {offered})",
                tipo.code()
            )));
        }

        let body = NuevaTimbrada {
            id_empleado: self.ctx.session.employee_id()?,
            tipo,
            latitud: coordinates.map(|(lat, _)| lat),
            longitud: coordinates.map(|(_, lon)| lon),
            observacion: OBSERVACION.to_string(),
        };
        let request = ApiRequest::post(endpoints::TIMBRADAS, &body)?;
        let gateway = self.ctx.gateway();
        self.ctx
            .activation
            .guard(async { execute(gateway, request).await.map_err(ConsoleError::from) })
            .await?;
        info!(id_empleado = body.id_empleado, tipo = tipo.code(), "punch registered");
        Ok(())
    }
}
