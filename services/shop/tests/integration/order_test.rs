use queso_domain::id::OrderId;
use queso_domain::order::{OrderStatus, PaymentOutcome};
use queso_domain::user::UserRole;
use queso_shop::error::ShopError;
use queso_shop::usecase::access::AuthenticateUseCase;
use queso_shop::usecase::order::{ConfirmPaymentUseCase, CreateOrderUseCase, ListMyOrdersUseCase};
use queso_shop::usecase::user::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
use queso_testing::auth::{cheap_credentials, test_token_service};

use crate::helpers::{InMemoryOrders, InMemoryUsers, test_user, two_item_order};

// ── Checkout scenario ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_settle_order_once_after_checkout() {
    let users = InMemoryUsers::default();
    let orders = InMemoryOrders::default();
    let tokens = test_token_service();

    RegisterUseCase {
        repo: users.clone(),
        credentials: cheap_credentials(),
    }
    .execute(RegisterInput {
        email: "ana@example.com".into(),
        name: "Ana".into(),
        password: "queso-1234".into(),
    })
    .await
    .unwrap();

    let issued = LoginUseCase {
        repo: users.clone(),
        credentials: cheap_credentials(),
        tokens: tokens.clone(),
    }
    .execute(LoginInput {
        email: "ana@example.com".into(),
        password: "queso-1234".into(),
    })
    .await
    .unwrap();

    let user = AuthenticateUseCase {
        users: users.clone(),
        tokens: tokens.clone(),
    }
    .execute(Some(&issued.token))
    .await
    .unwrap();

    let order = CreateOrderUseCase {
        repo: orders.clone(),
    }
    .execute(two_item_order(user.id, &user.email))
    .await
    .unwrap();
    assert_eq!(order.status, OrderStatus::New);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.total, 19990.0);
    assert_eq!(order.user_id, Some(user.id));

    let confirm = ConfirmPaymentUseCase {
        repo: orders.clone(),
    };
    let status = confirm
        .execute(order.id, user.id, PaymentOutcome::from_wire("ok"))
        .await
        .unwrap();
    assert_eq!(status, OrderStatus::Preparing);
    assert_eq!(orders.status_of(order.id), Some(OrderStatus::Preparing));

    let again = confirm
        .execute(order.id, user.id, PaymentOutcome::from_wire("ok"))
        .await;
    assert!(matches!(again, Err(ShopError::OrderAlreadyProcessed)));
    assert_eq!(orders.status_of(order.id), Some(OrderStatus::Preparing));

    let declined = confirm
        .execute(order.id, user.id, PaymentOutcome::from_wire("rechazo"))
        .await;
    assert!(matches!(declined, Err(ShopError::OrderAlreadyProcessed)));
    assert_eq!(orders.status_of(order.id), Some(OrderStatus::Preparing));
}

// ── ConfirmPayment ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_not_distinguish_foreign_order_from_missing_one() {
    let owner = test_user("ana@example.com", UserRole::Cliente);
    let stranger = test_user("luis@example.com", UserRole::Cliente);
    let orders = InMemoryOrders::default();
    let order = CreateOrderUseCase {
        repo: orders.clone(),
    }
    .execute(two_item_order(owner.id, &owner.email))
    .await
    .unwrap();

    let confirm = ConfirmPaymentUseCase {
        repo: orders.clone(),
    };
    let foreign = confirm
        .execute(order.id, stranger.id, PaymentOutcome::Approved)
        .await
        .unwrap_err();
    let missing = confirm
        .execute(OrderId::generate(), stranger.id, PaymentOutcome::Approved)
        .await
        .unwrap_err();

    assert!(matches!(foreign, ShopError::OrderNotFound));
    assert!(matches!(missing, ShopError::OrderNotFound));
    assert_eq!(foreign.kind(), missing.kind());
    assert_eq!(orders.status_of(order.id), Some(OrderStatus::New));
}

#[tokio::test]
async fn should_fail_payment_for_any_non_ok_outcome() {
    let owner = test_user("ana@example.com", UserRole::Cliente);
    let orders = InMemoryOrders::default();
    let order = CreateOrderUseCase {
        repo: orders.clone(),
    }
    .execute(two_item_order(owner.id, &owner.email))
    .await
    .unwrap();

    let status = ConfirmPaymentUseCase {
        repo: orders.clone(),
    }
    .execute(order.id, owner.id, PaymentOutcome::from_wire("error"))
    .await
    .unwrap();
    assert_eq!(status, OrderStatus::PaymentFailed);
}

#[tokio::test]
async fn should_let_exactly_one_of_two_concurrent_confirmations_win() {
    let owner = test_user("ana@example.com", UserRole::Cliente);
    let orders = InMemoryOrders::default();
    let order = CreateOrderUseCase {
        repo: orders.clone(),
    }
    .execute(two_item_order(owner.id, &owner.email))
    .await
    .unwrap();
    let usecase = ConfirmPaymentUseCase {
        repo: orders.clone(),
    };

    let (approved, declined) = tokio::join!(
        usecase.execute(order.id, owner.id, PaymentOutcome::Approved),
        usecase.execute(order.id, owner.id, PaymentOutcome::Declined),
    );

    let winner = match (approved, declined) {
        (Ok(status), Err(ShopError::OrderAlreadyProcessed)) => status,
        (Err(ShopError::OrderAlreadyProcessed), Ok(status)) => status,
        other => panic!("expected one winner and one OrderAlreadyProcessed, got {other:?}"),
    };
    assert_eq!(orders.status_of(order.id), Some(winner));
}

// ── ListMyOrders ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_only_own_orders_newest_first() {
    let ana = test_user("ana@example.com", UserRole::Cliente);
    let luis = test_user("luis@example.com", UserRole::Cliente);
    let orders = InMemoryOrders::default();
    let create = CreateOrderUseCase {
        repo: orders.clone(),
    };

    let older = create
        .execute(two_item_order(ana.id, &ana.email))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let newer = create
        .execute(two_item_order(ana.id, &ana.email))
        .await
        .unwrap();
    create
        .execute(two_item_order(luis.id, &luis.email))
        .await
        .unwrap();

    let listed = ListMyOrdersUseCase { repo: orders }
        .execute(ana.id)
        .await
        .unwrap();
    let ids: Vec<_> = listed.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}
