//! Account administration: lock or unlock logins and reset passwords.

use chrono::Utc;
use sigep_adapters::models::{CambioEstado, ResetPassword, Usuario};
use sigep_adapters::{call, endpoints, execute, ApiRequest};
use tracing::info;

use super::{Level, Notices, ScreenContext};
use crate::errors::ConsoleError;

pub const LOAD_FAILED: &str = "Error al cargar usuarios";
pub const TOGGLE_FAILED: &str = "Error al cambiar estado";
pub const RESET_FAILED: &str = "Error al actualizar contraseña";

pub struct UsersScreen {
    ctx: ScreenContext,
    pub loading: bool,
    pub usuarios: Vec<Usuario>,
    pub notices: Notices,
}

impl UsersScreen {
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            loading: false,
            usuarios: Vec::new(),
            notices: Notices::default(),
        }
    }

    pub async fn activate(&mut self) -> Result<(), ConsoleError> {
        self.loading = true;
        // Cache buster: the account list must reflect the toggle just made.
        let request = ApiRequest::get(endpoints::USUARIOS)
            .with_query("t", Utc::now().timestamp_millis().to_string());
        let gateway = self.ctx.gateway();
        let fetched = self
            .ctx
            .activation
            .guard(async { call::<Vec<Usuario>, _>(gateway, request).await.map_err(ConsoleError::from) })
            .await;
        self.loading = false;

        match fetched {
            Ok(usuarios) => {
                self.usuarios = usuarios;
                Ok(())
            }
            Err(ConsoleError::Cancelled) => Err(ConsoleError::Cancelled),
            Err(err) => {
                self.usuarios.clear();
                Err(self.notices.fail(err, LOAD_FAILED))
            }
        }
    }

    fn find(&self, id_usuario: i64) -> Result<&Usuario, ConsoleError> {
        self.usuarios
            .iter()
            .find(|usuario| usuario.id_usuario == id_usuario)
            .ok_or_else(|| ConsoleError::validation(format!("No existe el usuario {id_usuario}")))
    }

    /// Flips the account between active and locked.
    pub async fn toggle(&mut self, id_usuario: i64) -> Result<(), ConsoleError> {
        let result = self.submit_toggle(id_usuario).await;
        match result {
            Ok(estado) => {
                let text = if estado {
                    "Usuario activado correctamente"
                } else {
                    "Usuario bloqueado correctamente"
                };
                self.notices.push(Level::Success, text);
                self.activate().await
            }
            Err(err) => Err(self.notices.fail(err, TOGGLE_FAILED)),
        }
    }

    async fn submit_toggle(&self, id_usuario: i64) -> Result<bool, ConsoleError> {
        let estado = !self.find(id_usuario)?.estado;
        let request = ApiRequest::put(endpoints::usuario_estado(id_usuario), &CambioEstado { estado })?;
        let gateway = self.ctx.gateway();
        self.ctx
            .activation
            .guard(async { execute(gateway, request).await.map_err(ConsoleError::from) })
            .await?;
        info!(id_usuario, estado, "account status changed");
        Ok(estado)
    }

    /// An empty password is refused before any call is made. The account
    /// list does not need to be loaded first.
    pub async fn reset_password(&mut self, id_usuario: i64, nueva_clave: &str) -> Result<(), ConsoleError> {
        let result = self.submit_reset(id_usuario, nueva_clave).await;
        match result {
            Ok(username) => {
                self.notices
                    .push(Level::Success, format!("Contraseña actualizada para {username}"));
                Ok(())
            }
            Err(err) => Err(self.notices.fail(err, RESET_FAILED)),
        }
    }

    async fn submit_reset(&self, id_usuario: i64, nueva_clave: &str) -> Result<String, ConsoleError> {
        if nueva_clave.is_empty() {
            return Err(ConsoleError::validation("Por favor escribe la nueva contraseña"));
        }
        let username = self
            .find(id_usuario)
            .map(|usuario| usuario.username.clone())
            .unwrap_or_else(|_| format!("el usuario {id_usuario}"));
        let body = ResetPassword {
            nueva_clave: nueva_clave.to_string(),
        };
        let request = ApiRequest::put(endpoints::usuario_reset_password(id_usuario), &body)?;
        let gateway = self.ctx.gateway();
        self.ctx
            .activation
            .guard(async { execute(gateway, request).await.map_err(ConsoleError::from) })
            .await?;
        info!(id_usuario, "password reset");
        Ok(username)
    }
}
