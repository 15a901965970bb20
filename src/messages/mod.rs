use tokio::sync::oneshot;

use crate::auth_actor::AuthError;
use crate::domain::AuthUser;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed message enum for the auth service. Each variant includes parameters
/// and a oneshot channel for the response.
#[derive(Debug)]
pub enum AuthRequest {
    Login {
        email: String,
        password: String,
        respond_to: ServiceResponse<AuthUser, AuthError>,
    },
    Logout {
        respond_to: ServiceResponse<(), AuthError>,
    },
    CurrentUser {
        respond_to: ServiceResponse<Option<AuthUser>, AuthError>,
    },
}
