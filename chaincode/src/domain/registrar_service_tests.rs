//! Tests for the registrar contract service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{LedgerStoreError, MockLedgerStore, UserContract};
use crate::domain::{DEFAULT_ORG, ErrorCode, LedgerRecord, PropertyStatus, UserContractService};
use crate::outbound::InMemoryLedgerStore;
use crate::test_support::{
    fixture_clock, new_user, property_id, recharge, registration, user_id,
};

struct Contracts {
    store: Arc<InMemoryLedgerStore>,
    users: UserContractService<InMemoryLedgerStore>,
    registrar: RegistrarContractService<InMemoryLedgerStore>,
    namespaces: Arc<Namespaces>,
}

fn contracts_with(request_retention: RequestRetention) -> Contracts {
    let store = Arc::new(InMemoryLedgerStore::new());
    let namespaces = Arc::new(Namespaces::for_org(DEFAULT_ORG).expect("default org"));
    let policy = ContractPolicy {
        request_retention,
        ..ContractPolicy::default()
    };
    Contracts {
        users: UserContractService::new(
            Arc::clone(&store),
            Arc::clone(&namespaces),
            policy,
            fixture_clock(),
        ),
        registrar: RegistrarContractService::new(
            Arc::clone(&store),
            Arc::clone(&namespaces),
            policy,
        ),
        store,
        namespaces,
    }
}

#[fixture]
fn contracts() -> Contracts {
    contracts_with(RequestRetention::Retain)
}

#[rstest]
#[tokio::test]
async fn approving_a_user_starts_with_zero_balance(contracts: Contracts) {
    let request = contracts
        .users
        .request_new_user(new_user("U1", "Alice", "a@x.com", "555", "N1"))
        .await
        .expect("request");

    let user = contracts
        .registrar
        .approve_new_user(&user_id("U1"))
        .await
        .expect("approve");

    assert_eq!(user.coin_balance, 0);
    assert_eq!(user.name, request.name);
    assert_eq!(user.created_at, request.created_at);
    assert_eq!(
        contracts
            .registrar
            .view_user(&user_id("U1"))
            .await
            .expect("view"),
        user
    );
}

#[rstest]
#[tokio::test]
async fn approval_requires_pending_request(contracts: Contracts) {
    let err = contracts
        .registrar
        .approve_new_user(&user_id("U1"))
        .await
        .expect_err("no request");
    assert_eq!(
        err,
        ContractError::record_not_found(RecordKind::UserRequest, "U1")
    );

    let err = contracts
        .registrar
        .approve_property_registration(&property_id("P1"))
        .await
        .expect_err("no request");
    assert_eq!(
        err,
        ContractError::record_not_found(RecordKind::PropertyRequest, "P1")
    );
}

#[rstest]
#[tokio::test]
async fn second_user_approval_does_not_reset_balance(contracts: Contracts) {
    contracts
        .users
        .request_new_user(new_user("U1", "Alice", "a@x.com", "555", "N1"))
        .await
        .expect("request");
    contracts
        .registrar
        .approve_new_user(&user_id("U1"))
        .await
        .expect("first approval");
    contracts
        .users
        .recharge_account(recharge("U1", "Alice", "N1", "upg500"))
        .await
        .expect("recharge");

    let err = contracts
        .registrar
        .approve_new_user(&user_id("U1"))
        .await
        .expect_err("second approval");

    assert_eq!(err.code(), ErrorCode::AlreadyApproved);
    let user = contracts
        .registrar
        .view_user(&user_id("U1"))
        .await
        .expect("view");
    assert_eq!(user.coin_balance, 500);
}

#[rstest]
#[tokio::test]
async fn approving_a_property_carries_every_field(contracts: Contracts) {
    let request = contracts
        .users
        .property_registration_request(registration("P1", "Bob", "N2", 1000, "onSale"))
        .await
        .expect("registration");

    let property = contracts
        .registrar
        .approve_property_registration(&property_id("P1"))
        .await
        .expect("approve");

    assert_eq!(property.owner_key, request.owner_key);
    assert_eq!(property.price, 1000);
    assert_eq!(property.status, PropertyStatus::OnSale);
    assert_eq!(property.owner_name, request.owner_name);
    assert_eq!(property.owner_national_id, request.owner_national_id);
    assert_eq!(property.created_at, request.created_at);
}

#[rstest]
#[tokio::test]
async fn retained_requests_stay_on_the_ledger(contracts: Contracts) {
    contracts
        .users
        .request_new_user(new_user("U1", "Alice", "a@x.com", "555", "N1"))
        .await
        .expect("request");
    contracts
        .registrar
        .approve_new_user(&user_id("U1"))
        .await
        .expect("approve");

    let key = contracts
        .namespaces
        .user_request_key(&user_id("U1"))
        .expect("key");
    assert!(contracts.store.get_state(&key).await.expect("get").is_some());
}

#[rstest]
#[tokio::test]
async fn delete_retention_removes_approved_requests() {
    let contracts = contracts_with(RequestRetention::Delete);
    contracts
        .users
        .property_registration_request(registration("P1", "Bob", "N2", 1000, "registered"))
        .await
        .expect("registration");
    contracts
        .registrar
        .approve_property_registration(&property_id("P1"))
        .await
        .expect("approve");

    let request_key = contracts
        .namespaces
        .property_request_key(&property_id("P1"))
        .expect("key");
    assert!(
        contracts
            .store
            .get_state(&request_key)
            .await
            .expect("get")
            .is_none()
    );
    assert!(
        contracts
            .registrar
            .view_property(&property_id("P1"))
            .await
            .is_ok()
    );
}

#[rstest]
#[tokio::test]
async fn write_failure_aborts_approval() {
    let pending = contracts_with(RequestRetention::Retain);
    let request = pending
        .users
        .request_new_user(new_user("U1", "Alice", "a@x.com", "555", "N1"))
        .await
        .expect("request");
    let payload = request.encode().expect("encode");

    let mut store = MockLedgerStore::new();
    let mut reads = vec![None, Some(payload)];
    store
        .expect_get_state()
        .times(2)
        .returning(move |_| Ok(reads.pop().flatten()));
    store
        .expect_put_state()
        .times(1)
        .return_once(|_, _| Err(LedgerStoreError::query("endorsement rejected")));
    store.expect_delete_state().never();

    let registrar = RegistrarContractService::new(
        Arc::new(store),
        Arc::clone(&pending.namespaces),
        ContractPolicy {
            request_retention: RequestRetention::Delete,
            ..ContractPolicy::default()
        },
    );
    let err = registrar
        .approve_new_user(&user_id("U1"))
        .await
        .expect_err("write failure");
    assert_eq!(err.code(), ErrorCode::Ledger);
}
