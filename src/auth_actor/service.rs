use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::accounts::authenticate;
use super::error::AuthError;
use crate::clients::AuthClient;
use crate::domain::AuthUser;
use crate::messages::{AuthRequest, ServiceResponse};
use crate::persistence::{JsonSlot, KeyValueStore, SESSION_KEY};

// =============================================================================
// AUTH SERVICE
// =============================================================================

pub struct AuthService {
    receiver: mpsc::Receiver<AuthRequest>,
    session: JsonSlot<AuthUser>,
    current: Option<AuthUser>,
    login_latency: Duration,
}

impl AuthService {
    pub fn new(
        buffer_size: usize,
        store: Arc<dyn KeyValueStore>,
        login_latency: Duration,
    ) -> (Self, AuthClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            session: JsonSlot::new(store, SESSION_KEY),
            current: None,
            login_latency,
        };
        let client = AuthClient::new(sender);
        (service, client)
    }

    #[instrument(name = "auth_service", skip(self))]
    pub async fn run(mut self) {
        info!("AuthService starting");
        self.restore_session();
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                AuthRequest::Login {
                    email,
                    password,
                    respond_to,
                } => {
                    self.handle_login(email, password, respond_to).await;
                }
                AuthRequest::Logout { respond_to } => {
                    self.handle_logout(respond_to);
                }
                AuthRequest::CurrentUser { respond_to } => {
                    let _ = respond_to.send(Ok(self.current.clone()));
                }
            }
        }
        info!("AuthService stopped");
    }

    fn restore_session(&mut self) {
        match self.session.load() {
            Ok(Some(user)) => {
                info!(user_email = %user.email, "Restored stored session");
                self.current = Some(user);
            }
            Ok(None) => debug!("No stored session"),
            Err(e) => warn!(error = %e, "Could not read stored session"),
        }
    }

    #[instrument(fields(user_email = %email), skip(self, email, password, respond_to))]
    async fn handle_login(
        &mut self,
        email: String,
        password: String,
        respond_to: ServiceResponse<AuthUser, AuthError>,
    ) {
        debug!("Processing login request");
        if !self.login_latency.is_zero() {
            tokio::time::sleep(self.login_latency).await;
        }

        let Some(user) = authenticate(&email, &password) else {
            warn!("Login rejected");
            let _ = respond_to.send(Err(AuthError::InvalidCredentials));
            return;
        };

        if let Err(e) = self.session.save(&user) {
            warn!(error = %e, "Failed to persist session");
        }
        info!(role = ?user.role, "Login successful");
        self.current = Some(user.clone());
        let _ = respond_to.send(Ok(user));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_logout(&mut self, respond_to: ServiceResponse<(), AuthError>) {
        debug!("Processing logout request");
        self.current = None;
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear stored session");
        }
        let _ = respond_to.send(Ok(()));
    }
}
