//! Display mirror of the two-step leave approval chain.
//!
//! Manager sign-off comes first, HR authorization second. This decides which
//! buttons a viewer is offered; it is not an authorization check and it
//! never advances a request. The backend decides whether a command is
//! allowed.

use sigep_adapters::models::EstadoSolicitud;

use crate::auth::{ROLE_ADMIN, ROLE_JEFE, ROLE_TH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCapability {
    CanApproveOrReject,
    NoAction,
}

impl ViewCapability {
    pub fn allows_action(self) -> bool {
        matches!(self, ViewCapability::CanApproveOrReject)
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewCapability::CanApproveOrReject => "Aprobar / Rechazar",
            ViewCapability::NoAction => "Sin acciones pendientes",
        }
    }
}

/// Whether the viewer holds the pending step of `estado`.
///
/// `ROLE_ADMIN` stands in for both steps.
pub fn view_capability<S: AsRef<str>>(roles: &[S], estado: &EstadoSolicitud) -> ViewCapability {
    let has = |wanted: &str| roles.iter().any(|role| role.as_ref() == wanted);
    let admin = has(ROLE_ADMIN);

    let signs = match estado {
        EstadoSolicitud::PendienteAprobacionJefe => admin || has(ROLE_JEFE),
        EstadoSolicitud::PendienteAutorizacionTh => admin || has(ROLE_TH),
        _ => false,
    };

    if signs {
        ViewCapability::CanApproveOrReject
    } else {
        ViewCapability::NoAction
    }
}
