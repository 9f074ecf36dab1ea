use serde::{Deserialize, Serialize};

/// Entry of a reference lookup: `/api/areas`, `/api/cargos` or `/api/rol`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogo {
    pub id: i64,
    pub nombre: String,
}

pub type Area = Catalogo;
pub type Cargo = Catalogo;
pub type Rol = Catalogo;
