//! Tests for the letter service.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockLetterStore;
use crate::domain::{ErrorCode, Letter, LetterId, NearbyLetter};
use crate::outbound::memory::InMemoryLetterStore;

fn create_request(content: &str, longitude: f64, latitude: f64) -> CreateLetterRequest {
    CreateLetterRequest {
        content: content.to_owned(),
        longitude,
        latitude,
    }
}

fn nearby_request(radius_metres: Option<f64>) -> FindNearbyLettersRequest {
    FindNearbyLettersRequest {
        longitude: 139.767,
        latitude: 35.681,
        radius_metres,
    }
}

fn stored(id: i64, content: &str) -> Letter {
    Letter {
        id: LetterId::new(id),
        content: content.to_owned(),
        location: GeoPoint::new(139.767, 35.681).expect("valid point"),
        created_at: Utc::now(),
    }
}

fn nearby(id: i64, content: &str, distance_metres: f64) -> NearbyLetter {
    NearbyLetter {
        letter: stored(id, content),
        distance_metres,
    }
}

#[tokio::test]
async fn create_persists_valid_letter() {
    let mut store = MockLetterStore::new();
    store
        .expect_insert()
        .withf(|letter| {
            letter.content.as_str() == "hello"
                && letter.location.longitude() == 139.767
                && letter.location.latitude() == 35.681
        })
        .times(1)
        .return_once(|_| Ok(LetterId::new(42)));

    let service = LetterService::new(Arc::new(store));
    let response = service
        .create(create_request("hello", 139.767, 35.681))
        .await
        .expect("create succeeds");

    assert_eq!(response.letter_id, LetterId::new(42));
}

#[rstest]
#[case::empty_content("", 139.767, 35.681, "content")]
#[case::blank_content("   ", 139.767, 35.681, "content")]
#[case::latitude_out_of_range("hello", 139.767, 200.0, "latitude")]
#[case::longitude_out_of_range("hello", -181.0, 35.681, "longitude")]
#[case::nan_latitude("hello", 0.0, f64::NAN, "latitude")]
#[tokio::test]
async fn create_rejects_invalid_input_without_touching_store(
    #[case] content: &str,
    #[case] longitude: f64,
    #[case] latitude: f64,
    #[case] field: &str,
) {
    let mut store = MockLetterStore::new();
    store.expect_insert().times(0);

    let service = LetterService::new(Arc::new(store));
    let error = service
        .create(create_request(content, longitude, latitude))
        .await
        .expect_err("validation error");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error
            .details()
            .and_then(|details| details.get("field"))
            .and_then(serde_json::Value::as_str),
        Some(field)
    );
}

#[rstest]
#[case::connection(LetterStoreError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case::timeout(LetterStoreError::timeout("5000 ms"), ErrorCode::ServiceUnavailable)]
#[case::constraint(LetterStoreError::constraint("check"), ErrorCode::InternalError)]
#[case::query(LetterStoreError::query("bad sql"), ErrorCode::InternalError)]
#[tokio::test]
async fn create_maps_store_failures(
    #[case] failure: LetterStoreError,
    #[case] expected: ErrorCode,
) {
    let mut store = MockLetterStore::new();
    store
        .expect_insert()
        .times(1)
        .return_once(move |_| Err(failure));

    let service = LetterService::new(Arc::new(store));
    let error = service
        .create(create_request("hello", 139.767, 35.681))
        .await
        .expect_err("store failure");

    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn unavailable_message_hides_adapter_detail() {
    let mut store = MockLetterStore::new();
    store.expect_list_all().times(1).return_once(|| {
        Err(LetterStoreError::connection(
            "could not connect to postgres://letters:secret@db/letters",
        ))
    });

    let service = LetterService::new(Arc::new(store));
    let error = service.list_all().await.expect_err("unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    assert!(!error.message().contains("secret"));
}

#[tokio::test]
async fn list_all_keeps_content_visible() {
    let mut store = MockLetterStore::new();
    store
        .expect_list_all()
        .times(1)
        .return_once(|| Ok(vec![stored(1, "first"), stored(2, "second")]));

    let service = LetterService::new(Arc::new(store));
    let response = service.list_all().await.expect("list succeeds");

    let contents: Vec<&str> = response
        .letters
        .iter()
        .map(|letter| letter.content.as_str())
        .collect();
    assert_eq!(contents, ["first", "second"]);
}

#[tokio::test]
async fn repeated_list_all_without_writes_is_stable() {
    let service = LetterService::new(Arc::new(InMemoryLetterStore::new()));
    for (content, longitude) in [("first", 139.767), ("second", 139.768)] {
        service
            .create(create_request(content, longitude, 35.681))
            .await
            .expect("letter stored");
    }

    let first = service.list_all().await.expect("first listing");
    let second = service.list_all().await.expect("second listing");

    assert_eq!(first.letters.len(), 2);
    assert_eq!(first, second);
}

#[tokio::test]
async fn find_nearby_redacts_beyond_disclosure_radius() {
    let mut store = MockLetterStore::new();
    store.expect_query_nearby().times(1).return_once(|_, _| {
        Ok(vec![
            nearby(1, "close", 3.0),
            nearby(2, "boundary", 15.0),
            nearby(3, "far", 20.0),
        ])
    });

    let service = LetterService::new(Arc::new(store));
    let response = service
        .find_nearby(nearby_request(Some(100.0)))
        .await
        .expect("nearby succeeds");

    let contents: Vec<Option<&str>> = response
        .letters
        .iter()
        .map(|letter| letter.content.as_deref())
        .collect();
    assert_eq!(contents, [Some("close"), Some("boundary"), None]);
    assert_eq!(response.letters[2].distance_metres, 20.0);
}

#[tokio::test]
async fn find_nearby_orders_closest_first() {
    let mut store = MockLetterStore::new();
    store.expect_query_nearby().times(1).return_once(|_, _| {
        Ok(vec![
            nearby(5, "c", 40.0),
            nearby(4, "a", 2.0),
            nearby(3, "b", 2.0),
        ])
    });

    let service = LetterService::new(Arc::new(store));
    let response = service
        .find_nearby(nearby_request(None))
        .await
        .expect("nearby succeeds");

    let ids: Vec<i64> = response.letters.iter().map(|l| l.id.get()).collect();
    assert_eq!(ids, [3, 4, 5]);
}

#[tokio::test]
async fn find_nearby_applies_default_radius() {
    let mut store = MockLetterStore::new();
    store
        .expect_query_nearby()
        .withf(|_, radius| radius.metres() == 50.0)
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));

    let service = LetterService::new(Arc::new(store));
    service
        .find_nearby(nearby_request(None))
        .await
        .expect("nearby succeeds");
}

#[rstest]
#[case(0.0)]
#[case(-10.0)]
#[tokio::test]
async fn find_nearby_with_non_positive_radius_is_empty(#[case] radius: f64) {
    let mut store = MockLetterStore::new();
    store.expect_query_nearby().times(0);

    let service = LetterService::new(Arc::new(store));
    let response = service
        .find_nearby(nearby_request(Some(radius)))
        .await
        .expect("empty result, not an error");

    assert!(response.letters.is_empty());
}

#[rstest]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
#[tokio::test]
async fn find_nearby_rejects_non_finite_radius(#[case] radius: f64) {
    let mut store = MockLetterStore::new();
    store.expect_query_nearby().times(0);

    let service = LetterService::new(Arc::new(store));
    let error = service
        .find_nearby(nearby_request(Some(radius)))
        .await
        .expect_err("invalid radius");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn find_nearby_honours_wide_caller_radius() {
    let service = LetterService::new(Arc::new(InMemoryLetterStore::new()));
    service
        .create(create_request("hello", 139.767, 35.681))
        .await
        .expect("letter stored");

    // Roughly 60 km north of the letter.
    let response = service
        .find_nearby(FindNearbyLettersRequest {
            longitude: 139.767,
            latitude: 36.221,
            radius_metres: Some(100_000.0),
        })
        .await
        .expect("wide radius accepted");

    assert_eq!(response.letters.len(), 1);
    let letter = &response.letters[0];
    assert!(letter.distance_metres > 55_000.0 && letter.distance_metres < 65_000.0);
    assert!(letter.is_redacted());
}

#[tokio::test]
async fn find_nearby_rejects_invalid_origin() {
    let mut store = MockLetterStore::new();
    store.expect_query_nearby().times(0);

    let service = LetterService::new(Arc::new(store));
    let error = service
        .find_nearby(FindNearbyLettersRequest {
            longitude: 0.0,
            latitude: 95.0,
            radius_metres: Some(10.0),
        })
        .await
        .expect_err("invalid origin");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn custom_policy_changes_disclosure_threshold() {
    let mut store = MockLetterStore::new();
    store
        .expect_query_nearby()
        .times(1)
        .return_once(|_, _| Ok(vec![nearby(1, "hello", 8.0)]));

    let policy = DisclosurePolicy::new(5.0, 50.0).expect("valid policy");
    let service = LetterService::new(Arc::new(store)).with_policy(policy);
    let response = service
        .find_nearby(nearby_request(Some(30.0)))
        .await
        .expect("nearby succeeds");

    assert!(response.letters[0].is_redacted());
}
