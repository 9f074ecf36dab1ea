//! Plain-text rendering of screen state.
//!
//! Tables and notices go to stdout; tracing output stays on stderr.

use chrono::NaiveDateTime;
use sigep_adapters::models::{
    Catalogo, EstadoPersona, MenuEntry, Persona, Solicitud, Usuario,
};

use crate::auth::{Session, ROLE_ADMIN};
use crate::screens::attendance::AttendanceScreen;
use crate::screens::inbox::InboxScreen;
use crate::screens::personnel::PersonnelScreen;
use crate::screens::{Level, Notice};
use crate::services::attendance::DailySummary;

const EMPTY: &str = "-";

/// Column-aligned text table.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let width = cell.chars().count();
                match widths.get_mut(i) {
                    Some(current) => *current = (*current).max(width),
                    None => widths.push(width),
                }
            }
        }

        let line = |cells: &[String]| {
            cells
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let pad = widths[i].saturating_sub(cell.chars().count());
                    format!("{cell}{}", " ".repeat(pad))
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = line(&self.headers);
        out.push('\n');
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("  "));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&line(row));
        }
        out
    }
}

pub fn notices(notices: &[Notice]) {
    for notice in notices {
        let tag = match notice.level {
            Level::Success => "ok",
            Level::Info => "info",
            Level::Warning => "aviso",
            Level::Error => "error",
        };
        println!("[{tag}] {}", notice.text);
    }
}

fn or_empty(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or(EMPTY).to_string()
}

fn money(value: Option<f64>) -> String {
    value.map_or_else(|| EMPTY.to_string(), |v| format!("{v:.2}"))
}

fn day_time(value: NaiveDateTime) -> String {
    value.format("%d/%m/%Y %H:%M").to_string()
}

fn clock(value: Option<NaiveDateTime>) -> String {
    value.map_or_else(|| "--:--".to_string(), |v| v.format("%H:%M").to_string())
}

pub fn welcome(session: &Session) {
    let mensaje = session
        .payload
        .mensaje
        .clone()
        .unwrap_or_else(|| format!("Bienvenido, {}", session.username()));
    println!("{mensaje}");
    if session.has_role(ROLE_ADMIN) {
        println!("Roles: {}", session.roles().join(", "));
    }
    menu(session.menus());
}

/// Menu routes live under the dashboard.
pub fn menu(entries: &[MenuEntry]) {
    if entries.is_empty() {
        println!("Sin opciones de menú para esta sesión.");
        return;
    }
    let mut table = Table::new(["Opción", "Ruta"]);
    for entry in entries {
        table.row([entry.titulo.clone(), format!("/dashboard{}", entry.ruta)]);
    }
    println!("{}", table.render());
}

pub fn personnel(screen: &PersonnelScreen, estado: EstadoPersona) {
    println!(
        "Empleados: {}  Candidatos: {}  Rechazados: {}",
        screen.count(EstadoPersona::Empleado),
        screen.count(EstadoPersona::Candidato),
        screen.count(EstadoPersona::Rechazado),
    );
    let mut table = Table::new(["Id", "Cédula", "Nombre", "Correo", "Cargo", "Aspiración", "CV", "Estado"]);
    for persona in screen.tab(estado) {
        table.row(persona_row(persona));
    }
    println!("{}", table.render());
}

fn persona_row(persona: &Persona) -> Vec<String> {
    vec![
        persona.id.to_string(),
        persona.cedula.clone(),
        persona.nombre_completo(),
        or_empty(persona.correo.as_deref()),
        or_empty(persona.cargo_postulacion.as_ref().map(|c| c.nombre.as_str())),
        money(persona.aspiracion_salarial),
        if persona.hoja_vida_base64.as_deref().is_some_and(|cv| !cv.is_empty()) {
            "PDF".to_string()
        } else {
            EMPTY.to_string()
        },
        persona.estado_persona.label().to_string(),
    ]
}

pub fn catalog(title: &str, items: &[Catalogo]) {
    println!("{title}");
    let mut table = Table::new(["Id", "Nombre"]);
    for item in items {
        table.row([item.id.to_string(), item.nombre.clone()]);
    }
    println!("{}", table.render());
}

pub fn users(usuarios: &[Usuario]) {
    let mut table = Table::new(["Id", "Usuario", "Empleado", "Roles", "Estado"]);
    for usuario in usuarios {
        let roles: Vec<&str> = usuario.roles.iter().map(|r| r.nombre.as_str()).collect();
        table.row([
            usuario.id_usuario.to_string(),
            usuario.username.clone(),
            usuario.empleado_nombre().unwrap_or_else(|| EMPTY.to_string()),
            roles.join(", "),
            if usuario.estado { "ACTIVO" } else { "BLOQUEADO" }.to_string(),
        ]);
    }
    println!("{}", table.render());
}

pub fn inbox(screen: &InboxScreen) {
    let mut table = Table::new(["Id", "Empleado", "Tipo", "Desde", "Hasta", "Evidencia", "Estado", "Acciones"]);
    for solicitud in &screen.solicitudes {
        table.row([
            solicitud.id.to_string(),
            or_empty(solicitud.nombre_empleado.as_deref()),
            solicitud.tipo.clone(),
            day_time(solicitud.fecha_inicio),
            day_time(solicitud.fecha_fin),
            if solicitud.has_evidence() { "PDF" } else { EMPTY }.to_string(),
            solicitud.estado_solicitud.to_string(),
            screen.capability(solicitud).label().to_string(),
        ]);
    }
    println!("{}", table.render());
}

pub fn own_requests(solicitudes: &[Solicitud]) {
    let mut table = Table::new(["Id", "Solicitado", "Tipo", "Desde", "Hasta", "Motivo", "Estado"]);
    for solicitud in solicitudes {
        table.row([
            solicitud.id.to_string(),
            solicitud.fecha_solicitud.map_or_else(|| EMPTY.to_string(), day_time),
            solicitud.tipo.replace('_', " "),
            day_time(solicitud.fecha_inicio),
            day_time(solicitud.fecha_fin),
            or_empty(solicitud.motivo.as_deref()),
            solicitud.estado_solicitud.label(),
        ]);
    }
    println!("{}", table.render());
}

pub fn attendance(screen: &AttendanceScreen) {
    let (inicio, fin) = screen.range;
    println!("Periodo: {} al {}", inicio.format("%d/%m/%Y"), fin.format("%d/%m/%Y"));

    match screen.latest_today() {
        Some(last) => println!("Última marcación de hoy: {} a las {}", last.tipo.code(), clock(Some(last.fecha_hora))),
        None => println!("Sin marcaciones hoy"),
    }
    let next: Vec<&str> = screen.eligible().iter().map(|t| t.code()).collect();
    if next.is_empty() {
        println!("Jornada finalizada");
    } else {
        println!("Disponible: {}", next.join(", "));
    }

    println!("{}", summary_table(&screen.summary()).render());
}

fn summary_table(days: &[DailySummary]) -> Table {
    let mut table = Table::new(["Fecha", "Entrada", "Almuerzo", "Salida", "Estado"]);
    for day in days {
        table.row([
            day.fecha.format("%a %d/%m").to_string(),
            clock(day.entrada),
            format!("{} - {}", clock(day.almuerzo_inicio), clock(day.almuerzo_fin)),
            clock(day.salida),
            if day.is_complete() { "Completa" } else { "Incompleta" }.to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_columns_by_character_count() {
        let mut table = Table::new(["Id", "Nombre"]);
        table.row(["1", "Ñandú"]);
        table.row(["10", "Ana"]);

        assert_eq!(
            table.render(),
            "Id  Nombre\n--  ------\n1   Ñandú\n10  Ana"
        );
    }

    #[test]
    fn summary_marks_incomplete_days() {
        let fecha = chrono::NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let day = DailySummary {
            fecha,
            entrada: fecha.and_hms_opt(8, 1, 0),
            almuerzo_inicio: None,
            almuerzo_fin: None,
            salida: None,
        };
        let rendered = summary_table(&[day]).render();
        assert!(rendered.contains("08:01"));
        assert!(rendered.contains("Incompleta"));
    }
}
