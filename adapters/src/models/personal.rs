use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Catalogo, IdRef};

/// Lifecycle state of a person record. Only the backend moves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoPersona {
    Candidato,
    Empleado,
    Rechazado,
}

impl EstadoPersona {
    pub fn label(self) -> &'static str {
        match self {
            EstadoPersona::Candidato => "CANDIDATO",
            EstadoPersona::Empleado => "ACTIVO",
            EstadoPersona::Rechazado => "RECHAZADO",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub id: i64,
    pub cedula: String,
    pub nombres: String,
    pub apellidos: String,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub fecha_nacimiento: Option<NaiveDate>,
    pub estado_persona: EstadoPersona,
    #[serde(default)]
    pub aspiracion_salarial: Option<f64>,
    #[serde(default)]
    pub hoja_vida_base64: Option<String>,
    #[serde(default)]
    pub cargo_postulacion: Option<Catalogo>,
}

impl Persona {
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombres, self.apellidos)
    }
}

/// Body of `POST /api/personas/candidato`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevoCandidato {
    pub cedula: String,
    pub nombres: String,
    pub apellidos: String,
    pub correo: String,
    pub telefono: Option<String>,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub estado_persona: EstadoPersona,
    pub aspiracion_salarial: f64,
    pub hoja_vida_base64: Option<String>,
    pub cargo_postulacion: IdRef,
}

/// Body of `POST /api/empleado`, which promotes a candidate to employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevoEmpleado {
    pub persona: IdRef,
    pub area: IdRef,
    pub cargo: IdRef,
    pub codigo_empleado: String,
    pub salario_base: f64,
    pub email_corporativo: String,
    pub fecha_contratacion: NaiveDate,
    pub tipo_contrato: String,
    pub modalidad_trabajo: String,
    pub moneda: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmpleadoCreado {
    pub id_empleado: i64,
}
