use serde::{Deserialize, Serialize};

use super::Catalogo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id_usuario: i64,
    pub username: String,
    /// `true` when the account may log in.
    pub estado: bool,
    #[serde(default)]
    pub roles: Vec<Catalogo>,
    #[serde(default)]
    pub empleado: Option<EmpleadoAsociado>,
}

impl Usuario {
    /// Full name of the linked employee, when the account has one.
    pub fn empleado_nombre(&self) -> Option<String> {
        let persona = self.empleado.as_ref()?.persona.as_ref()?;
        Some(format!("{} {}", persona.nombres, persona.apellidos))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpleadoAsociado {
    #[serde(default)]
    pub persona: Option<NombrePersona>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NombrePersona {
    pub nombres: String,
    pub apellidos: String,
}

/// Body of `POST /api/usuarios`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevoUsuario {
    pub id_empleado: i64,
    pub password: String,
    pub roles_ids: Vec<i64>,
}

/// Body of `PUT /api/usuarios/{id}/estado`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CambioEstado {
    pub estado: bool,
}

/// Body of `PUT /api/usuarios/{id}/reset-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPassword {
    pub nueva_clave: String,
}
