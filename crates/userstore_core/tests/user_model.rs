use std::time::{SystemTime, UNIX_EPOCH};
use userstore_core::{User, UNSAVED_USER_ID};

#[test]
fn new_user_is_unsaved_and_stamped_now() {
    let before = epoch_ms();
    let user = User::new("John Doe", "john.doe@example.com");
    let after = epoch_ms();

    assert_eq!(user.id(), UNSAVED_USER_ID);
    assert!(!user.is_persisted());
    assert_eq!(user.name(), "John Doe");
    assert_eq!(user.email(), "john.doe@example.com");
    assert!(user.created_at() >= before && user.created_at() <= after);
}

#[test]
fn with_id_marks_user_as_persisted() {
    let user = User::with_id(7, "Ada", "ada@example.com");
    assert_eq!(user.id(), 7);
    assert!(user.is_persisted());
}

#[test]
fn setters_change_attributes_but_not_identity() {
    let mut user = User::from_parts(3, "old", "old@example.com", 1_000);
    user.set_name("new");
    user.set_email("new@example.com");

    assert_eq!(user.id(), 3);
    assert_eq!(user.name(), "new");
    assert_eq!(user.email(), "new@example.com");
    assert_eq!(user.created_at(), 1_000);
}

#[test]
fn user_serialization_uses_expected_wire_fields() {
    let user = User::from_parts(5, "Ada", "ada@example.com", 1_700_000_000_000);

    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["id"], 5);
    assert_eq!(json["name"], "Ada");
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["created_at"], 1_700_000_000_000_i64);

    let decoded: User = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, user);
}

fn epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}
