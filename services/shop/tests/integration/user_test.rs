use std::time::{Duration, Instant};

use queso_auth::password::CredentialStore;
use queso_domain::user::UserRole;
use queso_shop::error::ShopError;
use queso_shop::usecase::user::{
    AddAddressInput, AddAddressUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};
use queso_testing::auth::{cheap_credentials, test_token_service};

use crate::helpers::InMemoryUsers;

fn register(users: &InMemoryUsers) -> RegisterUseCase<InMemoryUsers> {
    RegisterUseCase {
        repo: users.clone(),
        credentials: cheap_credentials(),
    }
}

fn login(users: &InMemoryUsers) -> LoginUseCase<InMemoryUsers> {
    LoginUseCase {
        repo: users.clone(),
        credentials: cheap_credentials(),
        tokens: test_token_service(),
    }
}

fn input(email: &str, name: &str, password: &str) -> RegisterInput {
    RegisterInput {
        email: email.into(),
        name: name.into(),
        password: password.into(),
    }
}

// ── Register ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_keep_first_record_on_duplicate_registration() {
    let users = InMemoryUsers::default();
    let first = register(&users)
        .execute(input("ana@example.com", "Ana", "queso-1234"))
        .await
        .unwrap();

    let result = register(&users)
        .execute(input("ana@example.com", "Impostora", "otra-clave-99"))
        .await;
    assert!(matches!(result, Err(ShopError::EmailAlreadyExists)));

    let stored = users.users.lock().unwrap().clone();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, first.id);
    assert_eq!(stored[0].name, "Ana");
    assert_eq!(stored[0].password_hash, first.password_hash);
}

#[tokio::test]
async fn should_register_as_cliente_without_addresses() {
    let users = InMemoryUsers::default();
    let user = register(&users)
        .execute(input("ana@example.com", "Ana", "queso-1234"))
        .await
        .unwrap();
    assert_eq!(user.role, UserRole::Cliente);
    assert!(user.addresses.is_empty());
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_token_for_subject_email() {
    let users = InMemoryUsers::default();
    register(&users)
        .execute(input("ana@example.com", "Ana", "queso-1234"))
        .await
        .unwrap();

    let usecase = login(&users);
    let issued = usecase
        .execute(LoginInput {
            email: "ana@example.com".into(),
            password: "queso-1234".into(),
        })
        .await
        .unwrap();
    assert_eq!(
        usecase.tokens.verify(&issued.token),
        Ok("ana@example.com".to_owned())
    );
}

#[tokio::test]
async fn should_fail_identically_for_unknown_email_and_wrong_password() {
    let users = InMemoryUsers::default();
    register(&users)
        .execute(input("ana@example.com", "Ana", "queso-1234"))
        .await
        .unwrap();

    let unknown = login(&users)
        .execute(LoginInput {
            email: "nadie@example.com".into(),
            password: "queso-1234".into(),
        })
        .await
        .unwrap_err();
    let wrong = login(&users)
        .execute(LoginInput {
            email: "ana@example.com".into(),
            password: "queso-9999".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(unknown, ShopError::Unauthorized));
    assert!(matches!(wrong, ShopError::Unauthorized));
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[tokio::test]
async fn should_spend_comparable_time_on_unknown_email_and_wrong_password() {
    let users = InMemoryUsers::default();
    let credentials = CredentialStore::with_cost(Some(4096), Some(3)).unwrap();
    RegisterUseCase {
        repo: users.clone(),
        credentials: credentials.clone(),
    }
    .execute(input("ana@example.com", "Ana", "queso-1234"))
    .await
    .unwrap();
    let usecase = LoginUseCase {
        repo: users.clone(),
        credentials,
        tokens: test_token_service(),
    };

    let mut elapsed = [Duration::ZERO; 2];
    for _ in 0..5 {
        for (slot, email) in ["nadie@example.com", "ana@example.com"].into_iter().enumerate() {
            let started = Instant::now();
            let result = usecase
                .execute(LoginInput {
                    email: email.into(),
                    password: "queso-9999".into(),
                })
                .await;
            elapsed[slot] += started.elapsed();
            assert!(matches!(result, Err(ShopError::Unauthorized)));
        }
    }

    let [unknown, wrong] = elapsed;
    assert!(
        unknown * 4 >= wrong,
        "unknown email took {unknown:?}, wrong password took {wrong:?}"
    );
}

// ── AddAddress ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_flag_only_first_address_as_principal() {
    let users = InMemoryUsers::default();
    register(&users)
        .execute(input("ana@example.com", "Ana", "queso-1234"))
        .await
        .unwrap();
    let usecase = AddAddressUseCase {
        repo: users.clone(),
    };

    for (texto, comuna) in [("Los Aromos 123", "Ñuñoa"), ("Av. Grecia 45", "Peñalolén")] {
        let user = users.users.lock().unwrap()[0].clone();
        usecase
            .execute(
                &user,
                AddAddressInput {
                    texto: texto.into(),
                    comuna: comuna.into(),
                },
            )
            .await
            .unwrap();
    }

    let stored = users.users.lock().unwrap()[0].addresses.clone();
    assert_eq!(stored.len(), 2);
    assert!(stored[0].principal);
    assert!(!stored[1].principal);
    assert_eq!(stored.iter().filter(|a| a.principal).count(), 1);
}

#[tokio::test]
async fn should_keep_one_principal_when_first_addresses_race() {
    let users = InMemoryUsers::default();
    register(&users)
        .execute(input("ana@example.com", "Ana", "queso-1234"))
        .await
        .unwrap();
    let usecase = AddAddressUseCase {
        repo: users.clone(),
    };
    // Both requests carry the same snapshot with no addresses.
    let snapshot = users.users.lock().unwrap()[0].clone();

    let (first, second) = tokio::join!(
        usecase.execute(
            &snapshot,
            AddAddressInput {
                texto: "Los Aromos 123".into(),
                comuna: "Ñuñoa".into(),
            },
        ),
        usecase.execute(
            &snapshot,
            AddAddressInput {
                texto: "Av. Grecia 45".into(),
                comuna: "Peñalolén".into(),
            },
        ),
    );
    let (first, second) = (first.unwrap(), second.unwrap());
    assert_ne!(first.principal, second.principal);

    let stored = users.users.lock().unwrap()[0].addresses.clone();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored.iter().filter(|a| a.principal).count(), 1);
}
