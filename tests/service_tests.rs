use guestlist::Store;
use guestlist::domain::GuestPayload;
use guestlist::services::{GuestError, GuestListParams, GuestService};

async fn test_service() -> (GuestService, Store) {
    let store = Store::new("sqlite::memory:")
        .await
        .expect("Failed to open in-memory store");
    (GuestService::new(store.clone()), store)
}

fn payload(guest_type_id: i32, date: &str, time: &str, stay: &str) -> GuestPayload {
    GuestPayload {
        guest_type_id: Some(guest_type_id),
        coming_date: Some(date.to_string()),
        coming_time: Some(time.to_string()),
        stay_time: Some(stay.to_string()),
        comment: None,
    }
}

#[tokio::test]
async fn test_create_persists_derived_exit_fields() {
    let (service, _store) = test_service().await;

    let guest = service
        .create_guest(1, payload(1, "2024-02-29", "23:59:59", "00:00:01"))
        .await
        .unwrap();

    assert_eq!(guest.inviter_id, 1);
    assert_eq!(guest.coming_date, "2024-02-29");
    assert_eq!(guest.exit_date, "2024-03-01");
    assert_eq!(guest.exit_time, "00:00:00");
    assert_eq!(guest.stay_time, "00:00:01");
}

#[tokio::test]
async fn test_create_rejects_unknown_guest_type() {
    let (service, _store) = test_service().await;

    let err = service
        .create_guest(1, payload(42, "2024-03-10", "10:00:00", "01:00:00"))
        .await
        .unwrap_err();

    match err {
        GuestError::Validation(errors) => {
            assert_eq!(
                errors.get("guest_type_id").map(String::as_str),
                Some("Unknown guest type: 42.")
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_collects_all_field_errors_at_once() {
    let (service, _store) = test_service().await;

    let bad = GuestPayload {
        guest_type_id: None,
        coming_date: Some("March 10th".to_string()),
        coming_time: None,
        stay_time: Some("ninety minutes".to_string()),
        comment: Some("x".repeat(300)),
    };

    let err = service.create_guest(1, bad).await.unwrap_err();
    match err {
        GuestError::Validation(errors) => {
            assert_eq!(errors.len(), 5);
            assert!(errors.contains_key("guest_type_id"));
            assert!(errors.contains_key("coming_date"));
            assert!(errors.contains_key("coming_time"));
            assert!(errors.contains_key("stay_time"));
            assert!(errors.contains_key("comment"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_mutations_check_ownership_before_payload() {
    let (service, store) = test_service().await;

    store
        .user_repo()
        .create("bob", "bob@example.com", "hunter2secret")
        .await
        .unwrap();

    let guest = service
        .create_guest(1, payload(1, "2024-03-10", "10:00:00", "01:00:00"))
        .await
        .unwrap();

    // Invalid payload from a foreign caller: access denial wins
    let bad = GuestPayload::default();
    let err = service.update_guest(2, guest.id, bad).await.unwrap_err();
    assert!(matches!(err, GuestError::AccessDenied));

    let err = service.delete_guest(2, guest.id).await.unwrap_err();
    assert!(matches!(err, GuestError::AccessDenied));

    // Missing records report NotFound regardless of caller
    let err = service.delete_guest(2, 999_999).await.unwrap_err();
    assert!(matches!(err, GuestError::NotFound));

    service.delete_guest(1, guest.id).await.unwrap();
    let err = service.get_guest(guest.id).await.unwrap_err();
    assert!(matches!(err, GuestError::NotFound));
}

#[tokio::test]
async fn test_update_overwrites_every_mutable_field() {
    let (service, _store) = test_service().await;

    let guest = service
        .create_guest(1, payload(1, "2024-03-10", "10:00:00", "01:00:00"))
        .await
        .unwrap();

    let mut changed = payload(2, "2024-04-01", "22:30:00", "02:00:00");
    changed.comment = Some("late arrival".to_string());

    let updated = service.update_guest(1, guest.id, changed).await.unwrap();

    assert_eq!(updated.id, guest.id);
    assert_eq!(updated.inviter_id, 1);
    assert_eq!(updated.guest_type_id, 2);
    assert_eq!(updated.coming_date, "2024-04-01");
    assert_eq!(updated.exit_date, "2024-04-02");
    assert_eq!(updated.exit_time, "00:30:00");
    assert_eq!(updated.comment.as_deref(), Some("late arrival"));
}

#[tokio::test]
async fn test_list_defaults_and_page_links() {
    let (service, _store) = test_service().await;

    for day in 1..=12 {
        service
            .create_guest(1, payload(1, &format!("2024-03-{day:02}"), "10:00:00", "01:00:00"))
            .await
            .unwrap();
    }

    // Defaults: page 1, 10 per page
    let page = service.list_guests(GuestListParams::default()).await.unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total_guests, 12);
    assert_eq!(page.prev_page, None);
    assert_eq!(page.next_page, Some(2));

    let page = service
        .list_guests(GuestListParams {
            page: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.prev_page, Some(1));
    assert_eq!(page.next_page, None);

    // A page past the end is empty but still reports totals
    let page = service
        .list_guests(GuestListParams {
            page: Some(5),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_guests, 12);
    assert_eq!(page.prev_page, Some(4));
    assert_eq!(page.next_page, None);
}

#[tokio::test]
async fn test_list_rejects_non_positive_paging() {
    let (service, _store) = test_service().await;

    for (field, params) in [
        (
            "page",
            GuestListParams {
                page: Some(0),
                ..Default::default()
            },
        ),
        (
            "per_page",
            GuestListParams {
                per_page: Some(-3),
                ..Default::default()
            },
        ),
    ] {
        let err = service.list_guests(params).await.unwrap_err();
        match err {
            GuestError::Validation(errors) => {
                assert_eq!(
                    errors.get(field).map(String::as_str),
                    Some("Must be a positive integer.")
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_list_date_filter_accepts_unpadded_input() {
    let (service, _store) = test_service().await;

    service
        .create_guest(1, payload(1, "2024-03-09", "10:00:00", "01:00:00"))
        .await
        .unwrap();
    service
        .create_guest(1, payload(1, "2024-03-10", "10:00:00", "01:00:00"))
        .await
        .unwrap();

    // chrono parses "2024-3-10"; the filter must normalize it before the
    // string comparison against stored dates.
    let page = service
        .list_guests(GuestListParams {
            start_date: Some("2024-3-10".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total_guests, 1);
    assert_eq!(page.items[0].coming_date, "2024-03-10");
}

#[tokio::test]
async fn test_guest_types_are_seeded() {
    let (service, _store) = test_service().await;

    let types = service.list_guest_types().await.unwrap();
    let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["family", "friend", "colleague", "contractor"]);
}
