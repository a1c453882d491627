mod common;

use assert_matches::assert_matches;
use common::TestApp;
use rust_decimal_macros::dec;
use zbank_api::{
    common::MAX_MONEY, entities::account::AccountStatus, errors::ServiceError, seed,
    services::accounts::CreateAccountInput,
};

#[tokio::test]
async fn authenticate_returns_current_balance() {
    let app = TestApp::new().await;
    app.open_account("1234567890", "1234", Some(dec!(1000.00)))
        .await;

    let snapshot = app
        .accounts()
        .authenticate("1234567890", "1234")
        .await
        .expect("authenticate");

    assert_eq!(snapshot.account_number, "1234567890");
    assert_eq!(snapshot.balance, dec!(1000.00));
    assert_eq!(snapshot.status, AccountStatus::Active);
}

#[tokio::test]
async fn wrong_pin_fails_everywhere_and_leaves_balance() {
    let app = TestApp::new().await;
    app.open_account("1234567890", "1234", Some(dec!(1000.00)))
        .await;
    let service = app.accounts();

    assert_matches!(
        service.authenticate("1234567890", "4321").await,
        Err(ServiceError::InvalidPin)
    );
    assert_matches!(
        service.deposit("1234567890", "4321", dec!(50.00)).await,
        Err(ServiceError::InvalidPin)
    );
    assert_matches!(
        service.withdraw("1234567890", "4321", dec!(50.00)).await,
        Err(ServiceError::InvalidPin)
    );

    let balance = service.get_balance("1234567890").await.unwrap().balance;
    assert_eq!(balance, dec!(1000.00));
}

#[tokio::test]
async fn deposit_adds_exactly() {
    let app = TestApp::new().await;
    app.open_account("1234567890", "1234", Some(dec!(1000.00)))
        .await;

    let snapshot = app
        .accounts()
        .deposit("1234567890", "1234", dec!(500.00))
        .await
        .unwrap();
    assert_eq!(snapshot.balance, dec!(1500.00));
    assert_eq!(snapshot.balance.to_string(), "1500.00");

    let snapshot = app
        .accounts()
        .deposit("1234567890", "1234", dec!(0.10))
        .await
        .unwrap();
    assert_eq!(snapshot.balance.to_string(), "1500.10");
}

#[tokio::test]
async fn withdraw_subtracts_exactly() {
    let app = TestApp::new().await;
    app.open_account("1234567890", "1234", Some(dec!(1000.00)))
        .await;

    let snapshot = app
        .accounts()
        .withdraw("1234567890", "1234", dec!(300.00))
        .await
        .unwrap();
    assert_eq!(snapshot.balance.to_string(), "700.00");
}

#[tokio::test]
async fn overdraw_is_refused_and_balance_kept() {
    let app = TestApp::new().await;
    app.open_account("1234567890", "1234", Some(dec!(100.00)))
        .await;

    assert_matches!(
        app.accounts()
            .withdraw("1234567890", "1234", dec!(100.01))
            .await,
        Err(ServiceError::InsufficientFunds(_))
    );

    let balance = app
        .accounts()
        .get_balance("1234567890")
        .await
        .unwrap()
        .balance;
    assert_eq!(balance, dec!(100.00));
}

#[tokio::test]
async fn deposits_stop_at_the_balance_ceiling() {
    let app = TestApp::new().await;
    app.open_account("1234567890", "1234", Some(dec!(9999999999999.98)))
        .await;

    let snapshot = app
        .accounts()
        .deposit("1234567890", "1234", dec!(0.01))
        .await
        .unwrap();
    assert_eq!(snapshot.balance, MAX_MONEY);
    assert_eq!(snapshot.balance.to_string(), "9999999999999.99");

    assert_matches!(
        app.accounts()
            .deposit("1234567890", "1234", dec!(0.01))
            .await,
        Err(ServiceError::ValidationError(_))
    );

    let balance = app
        .accounts()
        .get_balance("1234567890")
        .await
        .unwrap()
        .balance;
    assert_eq!(balance.to_string(), "9999999999999.99");

    let snapshot = app
        .accounts()
        .withdraw("1234567890", "1234", dec!(0.01))
        .await
        .unwrap();
    assert_eq!(snapshot.balance.to_string(), "9999999999999.98");
}

#[tokio::test]
async fn opening_balance_above_the_ceiling_is_rejected() {
    let app = TestApp::new().await;

    let result = app
        .accounts()
        .create_account(CreateAccountInput {
            account_number: "1234567890".into(),
            pin: "1234".into(),
            balance: Some(dec!(10000000000000.00)),
            account_holder_name: None,
        })
        .await;

    assert_matches!(result, Err(ServiceError::ValidationError(_)));
    assert!(app.accounts().list_accounts().await.unwrap().is_empty());
}

#[tokio::test]
async fn non_positive_amounts_are_rejected_by_the_service() {
    let app = TestApp::new().await;
    app.open_account("1234567890", "1234", Some(dec!(10.00)))
        .await;

    assert_matches!(
        app.accounts().deposit("1234567890", "1234", dec!(0)).await,
        Err(ServiceError::ValidationError(_))
    );
    assert_matches!(
        app.accounts()
            .withdraw("1234567890", "1234", dec!(-1.00))
            .await,
        Err(ServiceError::ValidationError(_))
    );
}

#[tokio::test]
async fn unknown_account_is_not_found_for_every_operation() {
    let app = TestApp::new().await;
    let service = app.accounts();

    assert_matches!(
        service.authenticate("0000000000", "1234").await,
        Err(ServiceError::AccountNotFound(n)) if n == "0000000000"
    );
    assert_matches!(
        service.get_balance("0000000000").await,
        Err(ServiceError::AccountNotFound(_))
    );
    assert_matches!(
        service.deposit("0000000000", "1234", dec!(1.00)).await,
        Err(ServiceError::AccountNotFound(_))
    );
    assert_matches!(
        service.withdraw("0000000000", "1234", dec!(1.00)).await,
        Err(ServiceError::AccountNotFound(_))
    );
}

#[tokio::test]
async fn inactive_accounts_are_unreachable_but_listed() {
    let app = TestApp::new().await;
    app.open_account("2222222222", "1234", Some(dec!(10.00)))
        .await;
    app.open_account("3333333333", "1234", Some(dec!(10.00)))
        .await;

    let repository = app.accounts().repository();
    let locked = repository
        .find_by_number("2222222222")
        .await
        .unwrap()
        .unwrap();
    repository
        .update_status(locked, AccountStatus::Locked)
        .await
        .unwrap();
    let closed = repository
        .find_by_number("3333333333")
        .await
        .unwrap()
        .unwrap();
    repository
        .update_status(closed, AccountStatus::Closed)
        .await
        .unwrap();

    for number in ["2222222222", "3333333333"] {
        assert_matches!(
            app.accounts().authenticate(number, "1234").await,
            Err(ServiceError::AccountNotFound(_))
        );
        assert_matches!(
            app.accounts().get_balance(number).await,
            Err(ServiceError::AccountNotFound(_))
        );
        assert_matches!(
            app.accounts().deposit(number, "1234", dec!(1.00)).await,
            Err(ServiceError::AccountNotFound(_))
        );
        assert_matches!(
            app.accounts().withdraw(number, "1234", dec!(1.00)).await,
            Err(ServiceError::AccountNotFound(_))
        );
    }

    let listed = app.accounts().list_accounts().await.unwrap();
    let statuses: Vec<_> = listed.iter().map(|a| a.status).collect();
    assert_eq!(statuses, vec![AccountStatus::Locked, AccountStatus::Closed]);
}

#[tokio::test]
async fn duplicate_account_number_is_rejected() {
    let app = TestApp::new().await;
    app.open_account("1234567890", "1234", None).await;

    let result = app
        .accounts()
        .create_account(CreateAccountInput {
            account_number: "1234567890".into(),
            pin: "9999".into(),
            balance: Some(dec!(5.00)),
            account_holder_name: None,
        })
        .await;

    assert_matches!(result, Err(ServiceError::DuplicateAccount(n)) if n == "1234567890");
    assert_eq!(app.accounts().list_accounts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn storage_rejects_duplicates_that_skip_the_existence_check() {
    use sea_orm::Set;
    use zbank_api::entities::account;

    let app = TestApp::new().await;
    app.open_account("1234567890", "1234", None).await;

    let raw = account::ActiveModel {
        account_number: Set("1234567890".into()),
        pin_hash: Set("not-a-real-hash".into()),
        balance: Set(dec!(0.00)),
        account_holder_name: Set(None),
        status: Set(AccountStatus::Active),
        ..Default::default()
    };

    assert_matches!(
        app.accounts().repository().create(raw).await,
        Err(ServiceError::DuplicateAccount(_))
    );
}

#[tokio::test]
async fn new_account_defaults_to_zero_and_active() {
    let app = TestApp::new().await;
    let created = app.open_account("1111111111", "9999", None).await;

    assert_eq!(created.balance.to_string(), "0.00");
    assert_eq!(created.status, AccountStatus::Active);
    assert_eq!(created.account_holder_name.as_deref(), Some("Test User"));
}

#[tokio::test]
async fn pin_is_stored_hashed() {
    let app = TestApp::new().await;
    app.open_account("1111111111", "9999", None).await;

    let stored = app
        .accounts()
        .repository()
        .find_by_number("1111111111")
        .await
        .unwrap()
        .unwrap();

    assert_ne!(stored.pin_hash, "9999");
    assert!(stored.pin_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn list_returns_accounts_in_creation_order() {
    let app = TestApp::new().await;
    app.open_account("1000000001", "1111", Some(dec!(1.00))).await;
    app.open_account("1000000002", "2222", Some(dec!(2.00))).await;
    app.open_account("1000000003", "3333", Some(dec!(3.00))).await;

    let numbers: Vec<String> = app
        .accounts()
        .list_accounts()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.account_number)
        .collect();

    assert_eq!(numbers, vec!["1000000001", "1000000002", "1000000003"]);
}

#[tokio::test]
async fn end_to_end_open_deposit_withdraw_overdraw() {
    let app = TestApp::new().await;
    let service = app.accounts();

    let created = app.open_account("1111111111", "9999", None).await;
    assert_eq!(created.balance.to_string(), "0.00");

    let after_deposit = service
        .deposit("1111111111", "9999", dec!(250.75))
        .await
        .unwrap();
    assert_eq!(after_deposit.balance.to_string(), "250.75");

    let after_withdraw = service
        .withdraw("1111111111", "9999", dec!(250.75))
        .await
        .unwrap();
    assert_eq!(after_withdraw.balance.to_string(), "0.00");

    assert_matches!(
        service.withdraw("1111111111", "9999", dec!(0.01)).await,
        Err(ServiceError::InsufficientFunds(_))
    );
    assert_eq!(
        service
            .get_balance("1111111111")
            .await
            .unwrap()
            .balance
            .to_string(),
        "0.00"
    );
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let app = TestApp::new().await;

    let first = seed::seed_sample_accounts(app.accounts()).await.unwrap();
    assert_eq!(first, seed::SAMPLE_ACCOUNTS.len());

    let second = seed::seed_sample_accounts(app.accounts()).await.unwrap();
    assert_eq!(second, 0);

    let jane = app
        .accounts()
        .authenticate("9876543210", "5678")
        .await
        .unwrap();
    assert_eq!(jane.balance.to_string(), "5000.50");
    assert_eq!(jane.account_holder_name.as_deref(), Some("Jane Smith"));

    let bob = app.accounts().get_balance("5555555555").await.unwrap();
    assert_eq!(bob.balance.to_string(), "250.75");
}
