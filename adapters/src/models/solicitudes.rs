use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Approval status of a leave request.
///
/// States the console does not know are carried as `Otro` and never
/// offered any action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EstadoSolicitud {
    PendienteAprobacionJefe,
    PendienteAutorizacionTh,
    Aprobado,
    RechazadoJefe,
    RechazadoTh,
    Otro(String),
}

impl EstadoSolicitud {
    pub fn as_str(&self) -> &str {
        match self {
            EstadoSolicitud::PendienteAprobacionJefe => "PENDIENTE_APROBACION_JEFE",
            EstadoSolicitud::PendienteAutorizacionTh => "PENDIENTE_AUTORIZACION_TH",
            EstadoSolicitud::Aprobado => "APROBADO",
            EstadoSolicitud::RechazadoJefe => "RECHAZADO_JEFE",
            EstadoSolicitud::RechazadoTh => "RECHAZADO_TH",
            EstadoSolicitud::Otro(raw) => raw,
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.as_str().contains("RECHAZADO")
    }

    /// Short label shown to the requesting employee.
    pub fn label(&self) -> String {
        match self {
            EstadoSolicitud::PendienteAprobacionJefe => "Pendiente Jefe".to_string(),
            EstadoSolicitud::PendienteAutorizacionTh => "Pendiente TH".to_string(),
            EstadoSolicitud::Aprobado => "Aprobado".to_string(),
            EstadoSolicitud::RechazadoJefe | EstadoSolicitud::RechazadoTh => {
                "Rechazado".to_string()
            }
            EstadoSolicitud::Otro(raw) => raw.replace('_', " "),
        }
    }
}

impl From<String> for EstadoSolicitud {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PENDIENTE_APROBACION_JEFE" => EstadoSolicitud::PendienteAprobacionJefe,
            "PENDIENTE_AUTORIZACION_TH" => EstadoSolicitud::PendienteAutorizacionTh,
            "APROBADO" => EstadoSolicitud::Aprobado,
            "RECHAZADO_JEFE" => EstadoSolicitud::RechazadoJefe,
            "RECHAZADO_TH" => EstadoSolicitud::RechazadoTh,
            _ => EstadoSolicitud::Otro(raw),
        }
    }
}

impl From<EstadoSolicitud> for String {
    fn from(estado: EstadoSolicitud) -> Self {
        estado.as_str().to_string()
    }
}

impl fmt::Display for EstadoSolicitud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().replace('_', " "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoPermiso {
    Vacaciones,
    CitaMedica,
    IncapacidadMedica,
    CalamidadDomestica,
}

impl TipoPermiso {
    pub const ALL: [TipoPermiso; 4] = [
        TipoPermiso::Vacaciones,
        TipoPermiso::CitaMedica,
        TipoPermiso::IncapacidadMedica,
        TipoPermiso::CalamidadDomestica,
    ];

    pub fn code(self) -> &'static str {
        match self {
            TipoPermiso::Vacaciones => "VACACIONES",
            TipoPermiso::CitaMedica => "CITA_MEDICA",
            TipoPermiso::IncapacidadMedica => "INCAPACIDAD_MEDICA",
            TipoPermiso::CalamidadDomestica => "CALAMIDAD_DOMESTICA",
        }
    }
}

impl std::str::FromStr for TipoPermiso {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|tipo| tipo.code() == wanted)
            .ok_or_else(|| format!("Tipo de permiso desconocido: {s}"))
    }
}

/// A leave request as listed by `/api/solicitudes`.
///
/// `tipo` is kept as text on read since the backend may list kinds the
/// creation form does not offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solicitud {
    pub id: i64,
    #[serde(default)]
    pub nombre_empleado: Option<String>,
    pub tipo: String,
    #[serde(default)]
    pub fecha_solicitud: Option<NaiveDateTime>,
    pub fecha_inicio: NaiveDateTime,
    pub fecha_fin: NaiveDateTime,
    #[serde(default)]
    pub motivo: Option<String>,
    #[serde(default)]
    pub evidencia_base64: Option<String>,
    pub estado_solicitud: EstadoSolicitud,
}

impl Solicitud {
    pub fn has_evidence(&self) -> bool {
        self.evidencia_base64
            .as_deref()
            .is_some_and(|raw| !raw.trim().is_empty())
    }
}

/// Body of `POST /api/solicitudes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaSolicitud {
    pub id_empleado: i64,
    pub tipo: TipoPermiso,
    #[serde(with = "local_seconds")]
    pub fecha_inicio: NaiveDateTime,
    #[serde(with = "local_seconds")]
    pub fecha_fin: NaiveDateTime,
    pub motivo: String,
    /// Data URI of the evidence, or an empty string when nothing is attached.
    pub evidencia_base64: String,
}

/// Body of `PUT /api/solicitudes/{id}/aprobar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aprobacion {
    pub ejecutado_por: i64,
}

/// Body of `PUT /api/solicitudes/{id}/rechazar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rechazo {
    pub motivo: String,
    pub ejecutado_por: i64,
}

/// `YYYY-MM-DDTHH:mm:ss`, the format the backend parses request ranges with.
pub mod local_seconds {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn format(value: &NaiveDateTime) -> String {
        value.format(FORMAT).to_string()
    }

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn states_round_trip_including_unknown() {
        let known: EstadoSolicitud = serde_json::from_value(json!("PENDIENTE_AUTORIZACION_TH")).unwrap();
        assert_eq!(known, EstadoSolicitud::PendienteAutorizacionTh);

        let unknown: EstadoSolicitud = serde_json::from_value(json!("ANULADO")).unwrap();
        assert_eq!(unknown, EstadoSolicitud::Otro("ANULADO".into()));
        assert_eq!(serde_json::to_value(&unknown).unwrap(), json!("ANULADO"));
    }

    #[test]
    fn rejected_states_share_a_label() {
        assert!(EstadoSolicitud::RechazadoJefe.is_rejected());
        assert_eq!(EstadoSolicitud::RechazadoTh.label(), "Rechazado");
        assert_eq!(EstadoSolicitud::PendienteAprobacionJefe.to_string(), "PENDIENTE APROBACION JEFE");
    }

    #[test]
    fn request_range_is_sent_without_fraction() {
        let inicio = NaiveDateTime::parse_from_str("2026-10-20T08:00:00", local_seconds::FORMAT).unwrap();
        let body = NuevaSolicitud {
            id_empleado: 14,
            tipo: TipoPermiso::CitaMedica,
            fecha_inicio: inicio,
            fecha_fin: inicio + chrono::Duration::hours(2),
            motivo: "Control".into(),
            evidencia_base64: String::new(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["tipo"], json!("CITA_MEDICA"));
        assert_eq!(value["fechaInicio"], json!("2026-10-20T08:00:00"));
        assert_eq!(value["fechaFin"], json!("2026-10-20T10:00:00"));
        assert_eq!(value["evidenciaBase64"], json!(""));
    }

    #[test]
    fn parses_permission_kind_loosely() {
        assert_eq!("cita-medica".parse::<TipoPermiso>().unwrap(), TipoPermiso::CitaMedica);
        assert!("feriado".parse::<TipoPermiso>().is_err());
    }
}
