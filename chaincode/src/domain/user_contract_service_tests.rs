//! Tests for the participant contract service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{LedgerStoreError, MockLedgerStore};
use crate::domain::{
    DEFAULT_ORG, EmailAddress, ErrorCode, LedgerRecord, OwnerKeying, PhoneNumber,
};
use crate::outbound::InMemoryLedgerStore;
use crate::test_support::{
    fixed_now, fixture_clock, national_id, new_user, person_name, property_id, purchase, recharge,
    registration, update, user_id,
};

fn namespaces() -> Arc<Namespaces> {
    Arc::new(Namespaces::for_org(DEFAULT_ORG).expect("default org"))
}

fn service_with<S: LedgerStore>(store: Arc<S>, policy: ContractPolicy) -> UserContractService<S> {
    UserContractService::new(store, namespaces(), policy, fixture_clock())
}

#[fixture]
fn store() -> Arc<InMemoryLedgerStore> {
    Arc::new(InMemoryLedgerStore::new())
}

async fn seed_user(store: &InMemoryLedgerStore, coin_balance: u64) -> User {
    let request = UserRequest {
        user_id: user_id("U1"),
        name: person_name("Alice"),
        email: EmailAddress::new("a@x.com").expect("email"),
        phone: PhoneNumber::new("555").expect("phone"),
        national_id: national_id("N1"),
        created_at: fixed_now(),
    };
    let mut user = User::approve(request);
    user.coin_balance = coin_balance;
    let key = namespaces().user_key(&user.user_id).expect("user key");
    store
        .put_state(&key, user.encode().expect("encode"))
        .await
        .expect("seed user");
    user
}

async fn seed_property(store: &InMemoryLedgerStore, owner: &str, status: &str) -> Property {
    let service = service_with(Arc::new(InMemoryLedgerStore::new()), ContractPolicy::default());
    let request = service
        .property_registration_request(registration("P1", owner, "N2", 1000, status))
        .await
        .expect("registration");
    let property = Property::approve(request);
    let key = namespaces()
        .property_key(&property.property_id)
        .expect("property key");
    store
        .put_state(&key, property.encode().expect("encode"))
        .await
        .expect("seed property");
    property
}

#[rstest]
#[tokio::test]
async fn request_new_user_records_pending_request(store: Arc<InMemoryLedgerStore>) {
    let service = service_with(Arc::clone(&store), ContractPolicy::default());

    let request = service
        .request_new_user(new_user("U1", "Alice", "a@x.com", "555", "N1"))
        .await
        .expect("request succeeds");

    assert_eq!(request.user_id.as_str(), "U1");
    assert_eq!(request.created_at, fixed_now());
    let key = namespaces()
        .user_request_key(&request.user_id)
        .expect("request key");
    let stored = store.get_state(&key).await.expect("get").expect("stored");
    assert_eq!(UserRequest::decode(&stored).expect("decode"), request);
}

#[rstest]
#[tokio::test]
async fn duplicate_user_request_is_rejected(store: Arc<InMemoryLedgerStore>) {
    let service = service_with(store, ContractPolicy::default());
    service
        .request_new_user(new_user("U1", "Alice", "a@x.com", "555", "N1"))
        .await
        .expect("first request");

    let err = service
        .request_new_user(new_user("U1", "Alicia", "b@x.com", "556", "N9"))
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::DuplicateRequest);
}

#[rstest]
#[tokio::test]
async fn request_fields_are_stored_verbatim(store: Arc<InMemoryLedgerStore>) {
    let service = service_with(store, ContractPolicy::default());

    let request = service
        .request_new_user(new_user("U1", "Alice ", "a@x.com", "555 ext. 12", "N1"))
        .await
        .expect("free-form fields are accepted");

    assert_eq!(request.name.as_str(), "Alice ");
    assert_eq!(request.phone.as_str(), "555 ext. 12");
}

#[rstest]
#[tokio::test]
async fn user_request_for_approved_account_is_rejected(store: Arc<InMemoryLedgerStore>) {
    seed_user(&store, 0).await;
    let service = service_with(store, ContractPolicy::default());

    let err = service
        .request_new_user(new_user("U1", "Alice", "a@x.com", "555", "N1"))
        .await
        .expect_err("already approved");

    assert_eq!(
        err,
        ContractError::already_approved(RecordKind::User, "U1")
    );
}

#[rstest]
#[case("upg100", 100)]
#[case("upg500", 500)]
#[case("upg1000", 1000)]
#[tokio::test]
async fn recharge_credits_by_code(
    store: Arc<InMemoryLedgerStore>,
    #[case] code: &str,
    #[case] credit: u64,
) {
    seed_user(&store, 50).await;
    let service = service_with(Arc::clone(&store), ContractPolicy::default());

    let user = service
        .recharge_account(recharge("U1", "Alice", "N1", code))
        .await
        .expect("recharge succeeds");

    assert_eq!(user.coin_balance, 50 + credit);
    assert_eq!(
        service.get_user(&user_id("U1")).await.expect("get user"),
        user
    );
}

#[rstest]
#[tokio::test]
async fn unknown_code_leaves_user_unchanged(store: Arc<InMemoryLedgerStore>) {
    let seeded = seed_user(&store, 500).await;
    let service = service_with(Arc::clone(&store), ContractPolicy::default());

    let err = service
        .recharge_account(recharge("U1", "Alice", "N1", "upg42"))
        .await
        .expect_err("unknown code");

    assert_eq!(err.code(), ErrorCode::UnknownTransactionCode);
    assert_eq!(
        service.get_user(&user_id("U1")).await.expect("get user"),
        seeded
    );
}

#[rstest]
#[tokio::test]
async fn unknown_code_is_rejected_before_ledger_access() {
    let service = service_with(Arc::new(MockLedgerStore::new()), ContractPolicy::default());
    let err = service
        .recharge_account(recharge("U404", "Nobody", "N0", "free"))
        .await
        .expect_err("unknown code");
    assert_eq!(err.code(), ErrorCode::UnknownTransactionCode);
}

#[rstest]
#[tokio::test]
async fn recharge_requires_approved_user(store: Arc<InMemoryLedgerStore>) {
    let service = service_with(store, ContractPolicy::default());
    let err = service
        .recharge_account(recharge("U1", "Alice", "N1", "upg100"))
        .await
        .expect_err("missing user");
    assert_eq!(
        err,
        ContractError::record_not_found(RecordKind::User, "U1")
    );
}

#[rstest]
#[tokio::test]
async fn registration_rejects_invalid_status_without_ledger_access() {
    let service = service_with(Arc::new(MockLedgerStore::new()), ContractPolicy::default());
    let err = service
        .property_registration_request(registration("P1", "Bob", "N2", 1000, "sold"))
        .await
        .expect_err("invalid status");
    assert_eq!(err.code(), ErrorCode::InvalidStatus);
}

#[rstest]
#[case(OwnerKeying::DisplayName, "Bob")]
#[case(OwnerKeying::NationalId, "N2")]
#[tokio::test]
async fn registration_keys_owner_by_policy(
    store: Arc<InMemoryLedgerStore>,
    #[case] owner_keying: OwnerKeying,
    #[case] segment: &str,
) {
    let policy = ContractPolicy {
        owner_keying,
        ..ContractPolicy::default()
    };
    let service = service_with(store, policy);

    let request = service
        .property_registration_request(registration("P1", "Bob", "N2", 1000, "onSale"))
        .await
        .expect("registration");

    assert_eq!(request.status, PropertyStatus::OnSale);
    assert_eq!(request.price, 1000);
    assert_eq!(
        request.owner_key.segments().collect::<Vec<_>>(),
        vec![segment]
    );
}

#[rstest]
#[tokio::test]
async fn duplicate_registration_is_rejected(store: Arc<InMemoryLedgerStore>) {
    let service = service_with(store, ContractPolicy::default());
    service
        .property_registration_request(registration("P1", "Bob", "N2", 1000, "onSale"))
        .await
        .expect("first registration");
    let err = service
        .property_registration_request(registration("P1", "Carol", "N3", 5, "registered"))
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::DuplicateRequest);
}

#[rstest]
#[tokio::test]
async fn registration_for_approved_property_is_rejected(store: Arc<InMemoryLedgerStore>) {
    seed_property(&store, "Bob", "registered").await;
    let service = service_with(Arc::clone(&store), ContractPolicy::default());

    let err = service
        .property_registration_request(registration("P1", "Carol", "N3", 5, "onSale"))
        .await
        .expect_err("already approved");

    assert_eq!(
        err,
        ContractError::already_approved(RecordKind::Property, "P1")
    );
    let request_key = namespaces()
        .property_request_key(&property_id("P1"))
        .expect("request key");
    assert!(store.get_state(&request_key).await.expect("get").is_none());
}

#[rstest]
#[tokio::test]
async fn owner_can_update_status(store: Arc<InMemoryLedgerStore>) {
    let seeded = seed_property(&store, "Bob", "registered").await;
    let service = service_with(Arc::clone(&store), ContractPolicy::default());

    let updated = service
        .update_property(update("P1", "Bob", "N2", "onSale"))
        .await
        .expect("owner update");

    assert_eq!(updated.status, PropertyStatus::OnSale);
    assert_eq!(updated.price, seeded.price);
    assert_eq!(updated.created_at, seeded.created_at);
    assert_eq!(
        service
            .view_property(&property_id("P1"))
            .await
            .expect("view"),
        updated
    );
}

#[rstest]
#[tokio::test]
async fn non_owner_update_leaves_property_unchanged(store: Arc<InMemoryLedgerStore>) {
    let seeded = seed_property(&store, "Bob", "registered").await;
    let service = service_with(Arc::clone(&store), ContractPolicy::default());

    let err = service
        .update_property(update("P1", "Mallory", "N9", "onSale"))
        .await
        .expect_err("non-owner");

    assert_eq!(err.code(), ErrorCode::NotAuthorized);
    assert_eq!(
        service
            .view_property(&property_id("P1"))
            .await
            .expect("view"),
        seeded
    );
}

#[rstest]
#[tokio::test]
async fn update_rejects_invalid_status_first(store: Arc<InMemoryLedgerStore>) {
    let service = service_with(store, ContractPolicy::default());
    let err = service
        .update_property(update("P404", "Bob", "N2", "sold"))
        .await
        .expect_err("invalid status");
    assert_eq!(err.code(), ErrorCode::InvalidStatus);
}

#[rstest]
#[tokio::test]
async fn update_of_missing_property_is_not_found(store: Arc<InMemoryLedgerStore>) {
    let service = service_with(store, ContractPolicy::default());
    let err = service
        .update_property(update("P404", "Bob", "N2", "onSale"))
        .await
        .expect_err("missing property");
    assert_eq!(
        err,
        ContractError::record_not_found(RecordKind::Property, "P404")
    );
}

#[rstest]
#[tokio::test]
async fn purchase_of_missing_property_is_not_found(store: Arc<InMemoryLedgerStore>) {
    let service = service_with(Arc::clone(&store), ContractPolicy::default());
    let err = service
        .purchase_property(purchase("P404", "Carol", "N3"))
        .await
        .expect_err("missing property");
    assert_eq!(
        err,
        ContractError::record_not_found(RecordKind::Property, "P404")
    );
    assert!(store.is_empty().expect("ledger readable"));
}

#[rstest]
#[tokio::test]
async fn purchase_of_registered_property_is_rejected(store: Arc<InMemoryLedgerStore>) {
    seed_property(&store, "Bob", "registered").await;
    let service = service_with(store, ContractPolicy::default());
    let err = service
        .purchase_property(purchase("P1", "Carol", "N3"))
        .await
        .expect_err("not for sale");
    assert_eq!(err, ContractError::not_for_sale("P1"));
}

#[rstest]
#[tokio::test]
async fn purchase_transfers_on_sale_property(store: Arc<InMemoryLedgerStore>) {
    let seeded = seed_property(&store, "Bob", "onSale").await;
    let service = service_with(Arc::clone(&store), ContractPolicy::default());

    let bought = service
        .purchase_property(purchase("P1", "Carol", "N3"))
        .await
        .expect("purchase");

    assert_eq!(bought.status, PropertyStatus::Registered);
    assert_eq!(bought.owner_name.as_str(), "Carol");
    assert_ne!(bought.owner_key, seeded.owner_key);
    assert_eq!(bought.price, seeded.price);
}

#[rstest]
#[tokio::test]
async fn lookups_of_missing_records_fail(store: Arc<InMemoryLedgerStore>) {
    let service = service_with(store, ContractPolicy::default());
    let user_err = service
        .get_user(&user_id("U404"))
        .await
        .expect_err("missing user");
    let property_err = service
        .view_property(&property_id("P404"))
        .await
        .expect_err("missing property");
    assert_eq!(user_err.code(), ErrorCode::RecordNotFound);
    assert_eq!(property_err.code(), ErrorCode::RecordNotFound);
}

#[rstest]
#[tokio::test]
async fn ledger_failures_propagate() {
    let mut store = MockLedgerStore::new();
    store
        .expect_get_state()
        .times(1)
        .return_once(|_| Err(LedgerStoreError::connection("peer offline")));
    let service = service_with(Arc::new(store), ContractPolicy::default());

    let err = service
        .request_new_user(new_user("U1", "Alice", "a@x.com", "555", "N1"))
        .await
        .expect_err("ledger failure");

    assert_eq!(err.code(), ErrorCode::Ledger);
    assert!(err.to_string().contains("peer offline"));
}

#[rstest]
#[tokio::test]
async fn corrupted_record_surfaces_decode_error() {
    let mut store = MockLedgerStore::new();
    store
        .expect_get_state()
        .times(1)
        .return_once(|_| Ok(Some(b"{\"userId\":\"U1\"}".to_vec())));
    let service = service_with(Arc::new(store), ContractPolicy::default());

    let err = service
        .get_user(&user_id("U1"))
        .await
        .expect_err("malformed record");
    assert_eq!(err.code(), ErrorCode::DecodeError);
}
