//! Aggregation of raw punches into the daily attendance view.
//!
//! Everything here is recomputed from the fetched punches on every refresh
//! and never sent back to the backend.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use sigep_adapters::models::{Timbrada, TipoTimbrada};

/// One calendar day of punches, one slot per punch kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySummary {
    pub fecha: NaiveDate,
    pub entrada: Option<NaiveDateTime>,
    pub almuerzo_inicio: Option<NaiveDateTime>,
    pub almuerzo_fin: Option<NaiveDateTime>,
    pub salida: Option<NaiveDateTime>,
}

impl DailySummary {
    fn empty(fecha: NaiveDate) -> Self {
        Self {
            fecha,
            entrada: None,
            almuerzo_inicio: None,
            almuerzo_fin: None,
            salida: None,
        }
    }

    /// A day counts as complete once it has both clock-in and clock-out;
    /// the lunch slots are informative.
    pub fn is_complete(&self) -> bool {
        self.entrada.is_some() && self.salida.is_some()
    }

    fn slot_mut(&mut self, tipo: TipoTimbrada) -> &mut Option<NaiveDateTime> {
        match tipo {
            TipoTimbrada::Entrada => &mut self.entrada,
            TipoTimbrada::AlmuerzoInicio => &mut self.almuerzo_inicio,
            TipoTimbrada::AlmuerzoFin => &mut self.almuerzo_fin,
            TipoTimbrada::Salida => &mut self.salida,
        }
    }
}

/// Groups punches by calendar day, newest day first.
///
/// When a day has two punches of the same kind, the later one fills the slot.
pub fn summarize(punches: &[Timbrada]) -> Vec<DailySummary> {
    let mut days: BTreeMap<NaiveDate, DailySummary> = BTreeMap::new();

    for punch in punches {
        let fecha = punch.fecha_hora.date();
        let slot = days
            .entry(fecha)
            .or_insert_with(|| DailySummary::empty(fecha))
            .slot_mut(punch.tipo);
        if slot.map_or(true, |existing| punch.fecha_hora > existing) {
            *slot = Some(punch.fecha_hora);
        }
    }

    days.into_values().rev().collect()
}

/// The most recent punch registered on `day`.
pub fn latest_on(punches: &[Timbrada], day: NaiveDate) -> Option<&Timbrada> {
    punches
        .iter()
        .filter(|punch| punch.fecha_hora.date() == day)
        .max_by_key(|punch| punch.fecha_hora)
}

/// Punches the attendance panel offers after `last` on the same day.
///
/// Mirrors the backend sequence for display; the backend still validates.
pub fn allowed_next(last: Option<TipoTimbrada>) -> &'static [TipoTimbrada] {
    match last {
        None => &[TipoTimbrada::Entrada],
        Some(TipoTimbrada::Entrada) => &[TipoTimbrada::AlmuerzoInicio, TipoTimbrada::Salida],
        Some(TipoTimbrada::AlmuerzoInicio) => &[TipoTimbrada::AlmuerzoFin],
        Some(TipoTimbrada::AlmuerzoFin) => &[TipoTimbrada::Salida],
        Some(TipoTimbrada::Salida) => &[],
    }
}

/// Start of the current month through the end of `today`.
pub fn default_range(today: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let first = today.with_day(1).unwrap_or(today);
    (start_of(first), end_of(today))
}

pub fn start_of(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

pub fn end_of(day: NaiveDate) -> NaiveDateTime {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    day.and_time(last_second)
}
