#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};
use sigep_adapters::testing::ScriptedGateway;
use sigep_console::auth::Session;
use sigep_console::screens::ScreenContext;

pub fn session(roles: &[&str], id_empleado: Option<i64>) -> Session {
    let payload = serde_json::from_value(json!({
        "accesoConcedido": true,
        "mensaje": "Bienvenido",
        "idEmpleado": id_empleado,
        "roles": roles,
        "menus": [],
        "username": "jperez"
    }))
    .unwrap();
    Session::new(payload, Utc::now())
}

pub fn context(gateway: &Arc<ScriptedGateway>, session: Session) -> ScreenContext {
    ScreenContext::new(gateway.clone(), session)
}

pub fn persona(id: i64, estado: &str) -> Value {
    json!({
        "id": id,
        "cedula": format!("17200000{id:02}"),
        "nombres": format!("Nombre{id}"),
        "apellidos": "Mora",
        "correo": format!("persona{id}@correo.com"),
        "estadoPersona": estado,
        "aspiracionSalarial": 950.0
    })
}

pub fn solicitud(id: i64, estado: &str) -> Value {
    json!({
        "id": id,
        "nombreEmpleado": "Ana Mora",
        "tipo": "VACACIONES",
        "fechaInicio": "2026-10-20T08:00:00",
        "fechaFin": "2026-10-24T17:00:00",
        "motivo": "Viaje familiar",
        "estadoSolicitud": estado
    })
}
