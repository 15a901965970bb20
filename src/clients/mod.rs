//! Cloneable handles for talking to the actors.

#[macro_use]
mod macros;
mod catalog_client;

pub use catalog_client::*;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::auth_actor::AuthError;
use crate::domain::AuthUser;
use crate::messages::AuthRequest;

// =============================================================================
// Macro for message-enum clients
// =============================================================================

// Spans skip every argument so credentials never reach the logs.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[instrument(skip_all)]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

// =============================================================================
// Auth Client
// =============================================================================

/// Handle to the auth service. Pass it to whatever needs the signed-in user
/// instead of looking the user up globally.
#[derive(Clone)]
pub struct AuthClient {
    sender: mpsc::Sender<AuthRequest>,
}

impl AuthClient {
    pub fn new(sender: mpsc::Sender<AuthRequest>) -> Self {
        Self { sender }
    }
}

client_method!(AuthClient => fn login(email: String, password: String) -> AuthUser as AuthRequest::Login, Error = AuthError);
client_method!(AuthClient => fn logout() -> () as AuthRequest::Logout, Error = AuthError);
client_method!(AuthClient => fn current_user() -> Option<AuthUser> as AuthRequest::CurrentUser, Error = AuthError);
