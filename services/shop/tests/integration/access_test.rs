use chrono::Duration;

use queso_auth::bearer::bearer_token;
use queso_domain::user::UserRole;
use queso_shop::error::ShopError;
use queso_shop::usecase::access::{AuthenticateUseCase, require_active, require_admin};
use queso_testing::auth::{bearer_headers, test_token_service};

use crate::helpers::{InMemoryUsers, test_user};

fn authenticate(users: InMemoryUsers) -> AuthenticateUseCase<InMemoryUsers> {
    AuthenticateUseCase {
        users,
        tokens: test_token_service(),
    }
}

// ── AuthenticateUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_authenticate_and_authorize_admin() {
    let users = InMemoryUsers::with(vec![test_user("admin@quesos.cl", UserRole::Admin)]);
    let usecase = authenticate(users);
    let token = usecase.tokens.issue("admin@quesos.cl", None).unwrap().token;

    let user = usecase.execute(Some(&token)).await.unwrap();
    let user = require_active(user).unwrap();
    let admin = require_admin(user).unwrap();
    assert_eq!(admin.email, "admin@quesos.cl");
}

#[tokio::test]
async fn should_authenticate_from_authorization_header() {
    let users = InMemoryUsers::with(vec![test_user("ana@example.com", UserRole::Cliente)]);
    let usecase = authenticate(users);
    let headers = bearer_headers(&usecase.tokens, "ana@example.com");

    let token = bearer_token(&headers);
    let user = usecase.execute(token.as_deref()).await.unwrap();
    assert_eq!(user.email, "ana@example.com");
}

#[tokio::test]
async fn should_forbid_cliente_at_role_stage() {
    let users = InMemoryUsers::with(vec![test_user("ana@example.com", UserRole::Cliente)]);
    let usecase = authenticate(users);
    let token = usecase.tokens.issue("ana@example.com", None).unwrap().token;

    let user = usecase.execute(Some(&token)).await.unwrap();
    let result = require_active(user).and_then(require_admin);
    assert!(matches!(result, Err(ShopError::Forbidden)));
}

#[tokio::test]
async fn should_reject_token_with_one_tampered_byte() {
    let users = InMemoryUsers::with(vec![test_user("ana@example.com", UserRole::Admin)]);
    let usecase = authenticate(users);
    let token = usecase.tokens.issue("ana@example.com", None).unwrap().token;

    let mut bytes = token.into_bytes();
    let last = bytes.len() - 2;
    bytes[last] = if bytes[last] == b'x' { b'y' } else { b'x' };
    let tampered = String::from_utf8(bytes).unwrap();

    let result = usecase.execute(Some(&tampered)).await;
    assert!(matches!(result, Err(ShopError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_expired_token_even_for_admin() {
    let users = InMemoryUsers::with(vec![test_user("admin@quesos.cl", UserRole::Admin)]);
    let usecase = authenticate(users);
    let token = usecase
        .tokens
        .issue("admin@quesos.cl", Some(Duration::seconds(-1)))
        .unwrap()
        .token;

    let result = usecase.execute(Some(&token)).await;
    assert!(matches!(result, Err(ShopError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_token_of_deleted_subject() {
    let usecase = authenticate(InMemoryUsers::default());
    let token = usecase.tokens.issue("gone@example.com", None).unwrap().token;

    let result = usecase.execute(Some(&token)).await;
    assert!(matches!(result, Err(ShopError::Unauthorized)));
}

#[tokio::test]
async fn should_reread_role_from_store_on_every_request() {
    let users = InMemoryUsers::with(vec![test_user("ana@example.com", UserRole::Cliente)]);
    let usecase = authenticate(users.clone());
    let token = usecase.tokens.issue("ana@example.com", None).unwrap().token;

    let before = usecase.execute(Some(&token)).await.unwrap();
    assert!(require_admin(before).is_err());

    users.users.lock().unwrap()[0].role = UserRole::Admin;

    let after = usecase.execute(Some(&token)).await.unwrap();
    assert!(require_admin(after).is_ok());
}
