//! Relative paths of the backend endpoints consumed by the console.

pub const LOGIN: &str = "/api/auth/login";

pub const PERSONAS: &str = "/api/personas";
pub const CANDIDATOS: &str = "/api/personas/candidato";
pub const EMPLEADO: &str = "/api/empleado";

pub const USUARIOS: &str = "/api/usuarios";

pub const SOLICITUDES: &str = "/api/solicitudes";
pub const TIMBRADAS: &str = "/api/timbradas";

pub const AREAS: &str = "/api/areas";
pub const CARGOS: &str = "/api/cargos";
pub const ROLES: &str = "/api/rol";

pub fn usuario_estado(id_usuario: i64) -> String {
    format!("{USUARIOS}/{id_usuario}/estado")
}

pub fn usuario_reset_password(id_usuario: i64) -> String {
    format!("{USUARIOS}/{id_usuario}/reset-password")
}

pub fn solicitud_aprobar(id: i64) -> String {
    format!("{SOLICITUDES}/{id}/aprobar")
}

pub fn solicitud_rechazar(id: i64) -> String {
    format!("{SOLICITUDES}/{id}/rechazar")
}

pub fn solicitudes_empleado(id_empleado: i64) -> String {
    format!("{SOLICITUDES}/empleado/{id_empleado}")
}

pub fn timbradas_empleado(id_empleado: i64) -> String {
    format!("{TIMBRADAS}/empleado/{id_empleado}")
}
