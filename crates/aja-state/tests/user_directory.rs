mod common;

use aja_core::entities::UserDraft;
use aja_core::enums::{Role, UserStatus};
use aja_state::StateError;
use aja_state::admin::UserDirectory;
use common::FakeUsers;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

async fn loaded(backend: &FakeUsers) -> UserDirectory {
    let mut directory = UserDirectory::default();
    directory.refresh(backend).await.unwrap();
    directory
}

#[rstest]
#[case(None, 4)]
#[case(Some(Role::Admin), 1)]
#[case(Some(Role::Reviewer), 1)]
#[tokio::test]
async fn tabs_filter_by_role(#[case] tab: Option<Role>, #[case] expected: usize) {
    let backend = FakeUsers::seeded();
    let mut directory = loaded(&backend).await;
    directory.set_tab(tab);
    assert_eq!(directory.visible().len(), expected);
}

#[tokio::test]
async fn add_requires_username_and_password() {
    let backend = FakeUsers::seeded();
    let mut directory = loaded(&backend).await;

    let blank = UserDraft {
        password: Some("pw".into()),
        ..UserDraft::new("  ")
    };
    assert!(matches!(
        directory.add(&backend, &blank).await,
        Err(StateError::Core(_))
    ));
    assert!(directory.add(&backend, &UserDraft::new("meera")).await.is_err());
    assert_eq!(backend.users.lock().unwrap().len(), 4);

    let draft = UserDraft {
        role: Role::Uploader,
        password: Some("s3cret".into()),
        ..UserDraft::new("meera")
    };
    directory.add(&backend, &draft).await.unwrap();
    let meera = directory.find("meera").unwrap();
    assert_eq!(meera.role, Role::Uploader);
    assert_eq!(meera.status, UserStatus::Active);
}

#[tokio::test]
async fn update_and_delete_reload_the_list() {
    let backend = FakeUsers::seeded();
    let mut directory = loaded(&backend).await;

    let mut draft = UserDraft::from(directory.find("viewer").unwrap());
    draft.status = UserStatus::Inactive;
    directory.update(&backend, "4", &draft).await.unwrap();
    assert_eq!(directory.find("4").unwrap().status, UserStatus::Inactive);

    let err = directory.update(&backend, "99", &draft).await.unwrap_err();
    assert_eq!(err.to_string(), "API error (404): User not found");

    directory.delete(&backend, "2").await.unwrap();
    assert!(directory.find("uploader").is_none());
    assert_eq!(directory.users().len(), 3);
}

#[tokio::test]
async fn records_saved_by_the_admin_form_still_list() {
    let backend = FakeUsers::from_stored(json!([
        {"id": "1", "username": "admin", "role": "admin", "status": "Active"},
        {"id": "4", "name": "", "role": "viewer", "status": "Active", "username": "sam"},
        {"id": 5, "name": "Priya", "role": "Admin", "status": "Inactive"}
    ]));
    let mut directory = loaded(&backend).await;

    assert_eq!(directory.users().len(), 3);
    assert_eq!(directory.find("sam").unwrap().id, "4");
    assert_eq!(directory.find("5").unwrap().username, "Priya");

    directory.set_tab(Some(Role::Admin));
    let admins = directory
        .visible()
        .into_iter()
        .map(|user| user.username.as_str())
        .collect::<Vec<_>>();
    assert_eq!(admins, vec!["admin", "Priya"]);
}
