use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoTimbrada {
    Entrada,
    AlmuerzoInicio,
    AlmuerzoFin,
    Salida,
}

impl TipoTimbrada {
    pub const ALL: [TipoTimbrada; 4] = [
        TipoTimbrada::Entrada,
        TipoTimbrada::AlmuerzoInicio,
        TipoTimbrada::AlmuerzoFin,
        TipoTimbrada::Salida,
    ];

    pub fn code(self) -> &'static str {
        match self {
            TipoTimbrada::Entrada => "ENTRADA",
            TipoTimbrada::AlmuerzoInicio => "ALMUERZO_INICIO",
            TipoTimbrada::AlmuerzoFin => "ALMUERZO_FIN",
            TipoTimbrada::Salida => "SALIDA",
        }
    }
}

impl std::str::FromStr for TipoTimbrada {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|tipo| tipo.code() == wanted)
            .ok_or_else(|| format!("Tipo de timbrada desconocido: {s}"))
    }
}

/// A single attendance punch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timbrada {
    #[serde(default)]
    pub id: Option<i64>,
    pub tipo: TipoTimbrada,
    pub fecha_hora: NaiveDateTime,
    #[serde(default)]
    pub latitud: Option<f64>,
    #[serde(default)]
    pub longitud: Option<f64>,
    #[serde(default)]
    pub observacion: Option<String>,
}

/// Body of `POST /api/timbradas`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaTimbrada {
    pub id_empleado: i64,
    pub tipo: TipoTimbrada,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub observacion: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_punch_without_location() {
        let punch: Timbrada = serde_json::from_value(json!({
            "id": 91,
            "tipo": "ALMUERZO_INICIO",
            "fechaHora": "2026-10-14T13:02:11",
            "latitud": null,
            "longitud": null
        }))
        .unwrap();
        assert_eq!(punch.tipo, TipoTimbrada::AlmuerzoInicio);
        assert_eq!(punch.latitud, None);
    }

    #[test]
    fn new_punch_sends_null_coordinates() {
        let body = NuevaTimbrada {
            id_empleado: 14,
            tipo: TipoTimbrada::Entrada,
            latitud: None,
            longitud: None,
            observacion: "Marcación desde Portal Web".into(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["tipo"], json!("ENTRADA"));
        assert_eq!(value["latitud"], json!(null));
    }
}
