//! Personnel screen: applicants, employees and rejected records.
//!
//! Hiring promotes an applicant through the backend and then provisions the
//! new employee's login; the state change only becomes visible through the
//! refetch that follows.

use chrono::NaiveDate;
use sigep_adapters::models::{
    Area, Cargo, EmpleadoCreado, EstadoPersona, NuevoCandidato, NuevoEmpleado, NuevoUsuario,
    Persona, Rol,
};
use sigep_adapters::{call, endpoints, execute, ApiRequest};
use tracing::info;

use super::{Level, Notices, ScreenContext};
use crate::errors::ConsoleError;
use crate::services::attachments::Attachment;
use crate::services::validation;

pub const LOAD_FAILED: &str = "Error cargando la información.";
pub const HIRE_FAILED: &str = "Error al procesar.";
pub const REGISTER_FAILED: &str = "Error al registrar el candidato.";
pub const POSITIONS_FAILED: &str = "Error cargando cargos";

const TIPO_CONTRATO: &str = "INDEFINIDO";
const MODALIDAD_TRABAJO: &str = "PRESENCIAL";
const MONEDA: &str = "USD";
const CEDULA_MAX: usize = 13;
const PASSWORD_MIN: usize = 6;

/// Contract formalization form.
///
/// Salary and corporate email default to the candidate's salary aspiration
/// and personal email when left empty.
#[derive(Debug, Clone, Default)]
pub struct HireForm {
    pub candidato_id: Option<i64>,
    pub codigo_empleado: Option<String>,
    pub fecha_contratacion: Option<NaiveDate>,
    pub salario: Option<f64>,
    pub id_area: Option<i64>,
    pub id_cargo: Option<i64>,
    pub email_corporativo: Option<String>,
    pub password: Option<String>,
    pub roles: Vec<i64>,
}

/// New applicant form.
#[derive(Debug, Clone, Default)]
pub struct CandidateForm {
    pub cedula: Option<String>,
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub id_cargo: Option<i64>,
    pub aspiracion_salarial: Option<f64>,
    pub hoja_vida: Option<Attachment>,
}

pub struct PersonnelScreen {
    ctx: ScreenContext,
    pub loading: bool,
    pub areas: Vec<Area>,
    pub roles: Vec<Rol>,
    pub cargos: Vec<Cargo>,
    pub personas: Vec<Persona>,
    pub notices: Notices,
}

impl PersonnelScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            loading: false,
            areas: Vec::new(),
            roles: Vec::new(),
            cargos: Vec::new(),
            personas: Vec::new(),
            notices: Notices::default(),
        }
    }

    pub async fn activate(&mut self) -> Result<(), ConsoleError> {
        self.loading = true;
        let gateway = self.ctx.gateway.clone();
        let fetched = self
            .ctx
            .activation
            .guard(async {
                let gateway = gateway.as_ref();
                tokio::try_join!(
                    call::<Vec<Area>, _>(gateway, ApiRequest::get(endpoints::AREAS)),
                    call::<Vec<Rol>, _>(gateway, ApiRequest::get(endpoints::ROLES)),
                    call::<Vec<Cargo>, _>(gateway, ApiRequest::get(endpoints::CARGOS)),
                    call::<Vec<Persona>, _>(gateway, ApiRequest::get(endpoints::PERSONAS)),
                )
                .map_err(ConsoleError::from)
            })
            .await;
        self.loading = false;

        match fetched {
            Ok((areas, roles, cargos, personas)) => {
                self.areas = areas;
                self.roles = roles;
                self.cargos = cargos;
                self.personas = personas;
                Ok(())
            }
            Err(ConsoleError::Cancelled) => Err(ConsoleError::Cancelled),
            Err(err) => {
                self.areas.clear();
                self.roles.clear();
                self.cargos.clear();
                self.personas.clear();
                Err(self.notices.fail(err, LOAD_FAILED))
            }
        }
    }

    /// Records of one lifecycle state, in backend order.
    pub fn tab(&self, estado: EstadoPersona) -> Vec<&Persona> {
        self.personas
            .iter()
            .filter(|persona| persona.estado_persona == estado)
            .collect()
    }

    pub fn count(&self, estado: EstadoPersona) -> usize {
        self.tab(estado).len()
    }

    pub fn candidate(&self, id: i64) -> Option<&Persona> {
        self.personas
            .iter()
            .find(|persona| persona.id == id && persona.estado_persona == EstadoPersona::Candidato)
    }

    pub async fn hire(&mut self, form: HireForm) -> Result<(), ConsoleError> {
        let result = self.submit_hire(form).await;
        match result {
            Ok(nombres) => {
                self.notices
                    .push(Level::Success, format!("¡Contratación exitosa de {nombres}!"));
                self.activate().await
            }
            Err(err) => Err(self.notices.fail(err, HIRE_FAILED)),
        }
    }

    async fn submit_hire(&self, form: HireForm) -> Result<String, ConsoleError> {
        let candidato = form
            .candidato_id
            .and_then(|id| self.candidate(id))
            .ok_or_else(|| ConsoleError::validation("Debes seleccionar un candidato."))?;

        let codigo_empleado =
            validation::required(form.codigo_empleado.as_deref(), "Ingresa el código interno")?;
        let fecha_contratacion =
            validation::required_value(form.fecha_contratacion, "Selecciona la fecha de inicio")?;
        let salario = validation::required_value(
            form.salario.or(candidato.aspiracion_salarial),
            "Ingresa el sueldo acordado",
        )?;
        if !(salario.is_finite() && salario > 0.0) {
            return Err(ConsoleError::validation("El sueldo debe ser mayor a cero"));
        }
        let id_area = validation::required_value(form.id_area, "Selecciona el departamento")?;
        let id_cargo = validation::required_value(form.id_cargo, "Selecciona el cargo oficial")?;
        let email_corporativo = validation::required(
            form.email_corporativo.as_deref().or(candidato.correo.as_deref()),
            "Ingresa el email corporativo",
        )?;
        validation::email(&email_corporativo, "Email corporativo inválido")?;
        let password = form
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ConsoleError::validation("Ingresa la contraseña temporal"))?;
        validation::min_chars(
            &password,
            PASSWORD_MIN,
            "La contraseña temporal debe tener al menos 6 caracteres",
        )?;
        if form.roles.is_empty() {
            return Err(ConsoleError::validation("Selecciona al menos un rol"));
        }

        let empleado = NuevoEmpleado {
            persona: candidato.id.into(),
            area: id_area.into(),
            cargo: id_cargo.into(),
            codigo_empleado,
            salario_base: salario,
            email_corporativo,
            fecha_contratacion,
            tipo_contrato: TIPO_CONTRATO.to_string(),
            modalidad_trabajo: MODALIDAD_TRABAJO.to_string(),
            moneda: MONEDA.to_string(),
        };

        let gateway = self.ctx.gateway();
        let request = ApiRequest::post(endpoints::EMPLEADO, &empleado)?;
        let creado: EmpleadoCreado = self
            .ctx
            .activation
            .guard(async { call(gateway, request).await.map_err(ConsoleError::from) })
            .await?;
        info!(persona = candidato.id, empleado = creado.id_empleado, "candidate promoted");

        let usuario = NuevoUsuario {
            id_empleado: creado.id_empleado,
            password,
            roles_ids: form.roles,
        };
        let request = ApiRequest::post(endpoints::USUARIOS, &usuario)?;
        self.ctx
            .activation
            .guard(async { execute(gateway, request).await.map_err(ConsoleError::from) })
            .await?;
        info!(empleado = creado.id_empleado, "login provisioned");

        Ok(candidato.nombres.clone())
    }

    /// Fetches the positions an applicant may apply to.
    pub async fn load_positions(&mut self) -> Result<(), ConsoleError> {
        self.loading = true;
        let gateway = self.ctx.gateway();
        let fetched = self
            .ctx
            .activation
            .guard(async {
                call::<Vec<Cargo>, _>(gateway, ApiRequest::get(endpoints::CARGOS))
                    .await
                    .map_err(ConsoleError::from)
            })
            .await;
        self.loading = false;

        match fetched {
            Ok(cargos) => {
                self.cargos = cargos;
                Ok(())
            }
            Err(ConsoleError::Cancelled) => Err(ConsoleError::Cancelled),
            Err(err) => {
                self.cargos.clear();
                Err(self.notices.fail(err, POSITIONS_FAILED))
            }
        }
    }

    /// Validates the form, refreshes the position list, and posts the
    /// applicant only when the chosen position is one the backend listed.
    pub async fn register_candidate(&mut self, form: CandidateForm) -> Result<(), ConsoleError> {
        let body = match candidate_body(form) {
            Ok(body) => body,
            Err(err) => return Err(self.notices.fail(err, REGISTER_FAILED)),
        };

        self.load_positions().await?;
        let id_cargo = body.cargo_postulacion.id;
        if !self.cargos.iter().any(|cargo| cargo.id == id_cargo) {
            let err = ConsoleError::validation(format!("El cargo {id_cargo} no existe"));
            return Err(self.notices.fail(err, REGISTER_FAILED));
        }

        match self.submit_candidate(&body).await {
            Ok(()) => {
                self.notices
                    .push(Level::Success, "¡Candidato registrado exitosamente!");
                self.activate().await
            }
            Err(err) => Err(self.notices.fail(err, REGISTER_FAILED)),
        }
    }

    async fn submit_candidate(&self, body: &NuevoCandidato) -> Result<(), ConsoleError> {
        let request = ApiRequest::post(endpoints::CANDIDATOS, body)?;
        let gateway = self.ctx.gateway();
        self.ctx
            .activation
            .guard(async { execute(gateway, request).await.map_err(ConsoleError::from) })
            .await?;
        info!(cedula = %body.cedula, "candidate registered");
        Ok(())
    }

    /// Decoded CV of a listed applicant.
    pub fn candidate_cv(&self, id: i64) -> Result<Attachment, ConsoleError> {
        let persona = self
            .personas
            .iter()
            .find(|persona| persona.id == id)
            .ok_or_else(|| ConsoleError::validation(format!("No existe la persona {id}")))?;
        match persona.hoja_vida_base64.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Attachment::from_data_uri(raw),
            _ => Err(ConsoleError::validation("Sin archivo adjunto")),
        }
    }
}

fn candidate_body(form: CandidateForm) -> Result<NuevoCandidato, ConsoleError> {
    let cedula = validation::required(form.cedula.as_deref(), "Falta la cédula")?;
    validation::max_chars(&cedula, CEDULA_MAX, "La cédula admite hasta 13 caracteres")?;
    let nombres = validation::required(form.nombres.as_deref(), "Falta el nombre")?;
    let apellidos = validation::required(form.apellidos.as_deref(), "Falta el apellido")?;
    let correo = validation::required(form.correo.as_deref(), "Ingresa el correo electrónico")?;
    validation::email(&correo, "Correo electrónico inválido")?;
    let id_cargo = validation::required_value(form.id_cargo, "Selecciona el cargo al que aplica")?;
    let aspiracion_salarial =
        validation::required_value(form.aspiracion_salarial, "Ingresa la aspiración salarial")?;

    let hoja_vida_base64 = match &form.hoja_vida {
        Some(file) if file.mime != "application/pdf" => {
            return Err(ConsoleError::validation("La hoja de vida debe ser un PDF"));
        }
        Some(file) => Some(file.to_data_uri()),
        None => None,
    };

    Ok(NuevoCandidato {
        cedula,
        nombres,
        apellidos,
        correo,
        telefono: form
            .telefono
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
        fecha_nacimiento: form.fecha_nacimiento,
        estado_persona: EstadoPersona::Candidato,
        aspiracion_salarial,
        hoja_vida_base64,
        cargo_postulacion: id_cargo.into(),
    })
}
