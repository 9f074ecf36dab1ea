use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response of `POST /api/auth/login`.
///
/// Fields the console does not interpret are kept in `extra`, here and on
/// each menu entry, so the stored session round-trips the payload. A known
/// optional field sent as `null` is stored as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub acceso_concedido: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_empleado: Option<i64>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub menus: Vec<MenuEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Navigation entry granted to the user's roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub titulo: String,
    pub ruta: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icono: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_unknown_fields_verbatim() {
        let raw = json!({
            "accesoConcedido": true,
            "mensaje": "Bienvenido",
            "idEmpleado": 14,
            "roles": ["ROLE_JEFE"],
            "menus": [{"titulo": "Mis Permisos", "ruta": "/mis-permisos", "icono": "file-text"}],
            "username": "jperez",
            "area": "Operaciones"
        });

        let decoded: LoginResponse = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(decoded.id_empleado, Some(14));
        assert_eq!(decoded.menus[0].ruta, "/mis-permisos");
        assert_eq!(decoded.extra.get("area"), Some(&json!("Operaciones")));
        assert_eq!(serde_json::to_value(&decoded).unwrap(), raw);
    }

    #[test]
    fn keeps_unknown_menu_fields() {
        let raw = json!({
            "accesoConcedido": true,
            "roles": ["ROLE_TH"],
            "menus": [{
                "titulo": "Personal",
                "ruta": "/personal",
                "orden": 2,
                "hijos": [{"titulo": "Candidatos", "ruta": "/personal/candidatos"}]
            }]
        });

        let decoded: LoginResponse = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(decoded.menus[0].extra.get("orden"), Some(&json!(2)));
        assert_eq!(serde_json::to_value(&decoded).unwrap(), raw);
    }

    #[test]
    fn missing_grant_flag_is_a_shape_error() {
        let raw = json!({"mensaje": "ok", "roles": []});
        assert!(serde_json::from_value::<LoginResponse>(raw).is_err());
    }
}
