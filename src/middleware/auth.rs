use std::{fmt, marker::PhantomData, sync::Arc};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{
    dto::auth::Claims,
    entity::enums::Role,
    error::{AppError, AppResult},
    services::user_service,
    state::AppState,
};

#[derive(Clone)]
pub struct AuthKeys {
    inner: Arc<KeyPair>,
}

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl fmt::Debug for AuthKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthKeys").finish_non_exhaustive()
    }
}

impl AuthKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            inner: Arc::new(KeyPair {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            }),
        }
    }

    pub fn issue(&self, user_id: Uuid, email: Option<&str>, ttl: Duration) -> AppResult<String> {
        let expiration = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.map(str::to_owned),
            exp: expiration.timestamp().max(0) as usize,
        };

        encode(&Header::default(), &claims, &self.inner.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
    }

    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.inner.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!(error = %err, "rejected identity token");
                AppError::Unauthorized
            })
    }
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AuthKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?;

        let auth_str = auth_header.to_str().map_err(|_| AppError::Unauthorized)?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::Unauthorized)?;

        let keys = AuthKeys::from_ref(state);
        let claims = keys.verify(token)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?;

        Ok(AuthUser {
            user_id,
            email: claims.email,
        })
    }
}

/// Identity plus role, resolved once per request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub role: Role,
}

impl AuthContext {
    pub fn is_reviewer(&self) -> bool {
        Reviewer::allows(self.role)
    }
}

#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthContext);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let role = user_service::resolve_role(&state.orm, user.user_id).await?;
        Ok(CurrentUser(AuthContext {
            user_id: user.user_id,
            email: user.email,
            role,
        }))
    }
}

pub trait RoleRequirement: Send + Sync + 'static {
    const LABEL: &'static str;

    fn allows(role: Role) -> bool;
}

pub struct AdminOnly;
pub struct VetOnly;
pub struct VolunteerOnly;
/// Admins and vets, who both review adoption applications.
pub struct Reviewer;

impl RoleRequirement for AdminOnly {
    const LABEL: &'static str = "admin";

    fn allows(role: Role) -> bool {
        role == Role::Admin
    }
}

impl RoleRequirement for VetOnly {
    const LABEL: &'static str = "vet";

    fn allows(role: Role) -> bool {
        role == Role::Vet
    }
}

impl RoleRequirement for VolunteerOnly {
    const LABEL: &'static str = "volunteer";

    fn allows(role: Role) -> bool {
        role == Role::Volunteer
    }
}

impl RoleRequirement for Reviewer {
    const LABEL: &'static str = "reviewer";

    fn allows(role: Role) -> bool {
        matches!(role, Role::Admin | Role::Vet)
    }
}

pub fn authorize<R: RoleRequirement>(ctx: &AuthContext) -> Result<(), AppError> {
    if R::allows(ctx.role) {
        Ok(())
    } else {
        tracing::info!(
            user_id = %ctx.user_id,
            role = %ctx.role,
            required = R::LABEL,
            "access denied"
        );
        Err(AppError::Forbidden)
    }
}

pub struct RoleGate<R> {
    pub ctx: AuthContext,
    _requirement: PhantomData<R>,
}

impl<R> RoleGate<R> {
    pub fn into_context(self) -> AuthContext {
        self.ctx
    }
}

impl<R> fmt::Debug for RoleGate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RoleGate").field(&self.ctx).finish()
    }
}

impl<R: RoleRequirement> FromRequestParts<AppState> for RoleGate<R> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(ctx) = CurrentUser::from_request_parts(parts, state).await?;
        authorize::<R>(&ctx)?;
        Ok(RoleGate {
            ctx,
            _requirement: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: Role) -> AuthContext {
        AuthContext {
            user_id: Uuid::new_v4(),
            email: None,
            role,
        }
    }

    #[test]
    fn issued_tokens_verify() {
        let keys = AuthKeys::from_secret(b"unit-test-secret");
        let user_id = Uuid::new_v4();
        let token = keys
            .issue(user_id, Some("adopter@example.com"), Duration::hours(1))
            .unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email.as_deref(), Some("adopter@example.com"));
    }

    #[test]
    fn expired_or_foreign_tokens_are_unauthorized() {
        let keys = AuthKeys::from_secret(b"unit-test-secret");
        let expired = keys
            .issue(Uuid::new_v4(), None, Duration::hours(-2))
            .unwrap();
        assert!(matches!(keys.verify(&expired), Err(AppError::Unauthorized)));

        let other = AuthKeys::from_secret(b"someone-else");
        let foreign = other.issue(Uuid::new_v4(), None, Duration::hours(1)).unwrap();
        assert!(matches!(keys.verify(&foreign), Err(AppError::Unauthorized)));
    }

    #[test]
    fn requirements_admit_expected_roles() {
        assert!(authorize::<AdminOnly>(&ctx(Role::Admin)).is_ok());
        assert!(authorize::<AdminOnly>(&ctx(Role::Vet)).is_err());
        assert!(authorize::<AdminOnly>(&ctx(Role::User)).is_err());

        assert!(authorize::<VetOnly>(&ctx(Role::Vet)).is_ok());
        assert!(authorize::<VetOnly>(&ctx(Role::Admin)).is_err());

        assert!(authorize::<VolunteerOnly>(&ctx(Role::Volunteer)).is_ok());
        assert!(authorize::<VolunteerOnly>(&ctx(Role::User)).is_err());

        assert!(authorize::<Reviewer>(&ctx(Role::Admin)).is_ok());
        assert!(authorize::<Reviewer>(&ctx(Role::Vet)).is_ok());
        assert!(authorize::<Reviewer>(&ctx(Role::Volunteer)).is_err());
        assert!(authorize::<Reviewer>(&ctx(Role::User)).is_err());
    }

    #[test]
    fn denial_is_forbidden() {
        let err = authorize::<AdminOnly>(&ctx(Role::User)).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
        assert!(ctx(Role::Vet).is_reviewer());
        assert!(!ctx(Role::Volunteer).is_reviewer());
    }
}
