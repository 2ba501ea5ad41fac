use uuid::Uuid;

use academy_domain::user::{UserRole, UserStatus};
use academy_users::error::UsersServiceError;
use academy_users::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, FindUserCredentialsUseCase,
    GetUserUseCase, ListUsersUseCase, UpdateUserInput, UpdateUserStatusUseCase, UpdateUserUseCase,
};

use crate::helpers::{InMemoryStore, PrefixHasher, course};

fn create_usecase(store: &InMemoryStore) -> CreateUserUseCase<InMemoryStore, InMemoryStore, PrefixHasher> {
    CreateUserUseCase {
        users: store.clone(),
        enrollments: store.clone(),
        hasher: PrefixHasher,
    }
}

fn update_usecase(store: &InMemoryStore) -> UpdateUserUseCase<InMemoryStore, InMemoryStore, PrefixHasher> {
    UpdateUserUseCase {
        users: store.clone(),
        enrollments: store.clone(),
        hasher: PrefixHasher,
    }
}

fn get_usecase(store: &InMemoryStore) -> GetUserUseCase<InMemoryStore, InMemoryStore> {
    GetUserUseCase {
        users: store.clone(),
        enrollments: store.clone(),
    }
}

fn ann(assigned_course_ids: Vec<Uuid>) -> CreateUserInput {
    CreateUserInput {
        name: "Ann".to_owned(),
        email: "ann@x.com".to_owned(),
        password: "pw123".to_owned(),
        role: None,
        assigned_course_ids,
    }
}

#[tokio::test]
async fn should_find_created_user_with_matching_fields() {
    let store = InMemoryStore::default();

    let created = create_usecase(&store)
        .execute(CreateUserInput {
            role: Some(UserRole::Instructor),
            ..ann(vec![])
        })
        .await
        .unwrap();
    let found = get_usecase(&store).execute(created.profile.id).await.unwrap();

    assert_eq!(found, created);
    assert_eq!(found.profile.name, "Ann");
    assert_eq!(found.profile.email, "ann@x.com");
    assert_eq!(found.profile.role, UserRole::Instructor);
    assert_eq!(found.profile.status, UserStatus::Active);

    let stored = store.stored_user(created.profile.id).unwrap();
    assert_ne!(stored.password_hash, "pw123", "password must be stored hashed");
    assert_eq!(stored.password_hash, "hashed:pw123");
}

#[tokio::test]
async fn should_attach_assigned_course_on_create() {
    let c1 = course("Rust", 1, vec![]);
    let store = InMemoryStore::with_courses(vec![c1.clone()]);

    let created = create_usecase(&store).execute(ann(vec![c1.id])).await.unwrap();

    assert_eq!(created.assigned_courses.len(), 1);
    assert_eq!(created.assigned_courses[0].id, c1.id);
    assert_eq!(created.assigned_courses[0].title, "Rust");
}

#[tokio::test]
async fn should_reject_unknown_course_on_create_without_persisting() {
    let store = InMemoryStore::default();

    let result = create_usecase(&store).execute(ann(vec![Uuid::now_v7()])).await;

    assert!(
        matches!(result, Err(UsersServiceError::InvalidCourseReference)),
        "expected InvalidCourseReference, got {result:?}"
    );
    assert_eq!(store.user_count(), 0);
}

#[tokio::test]
async fn should_reject_duplicate_email() {
    let store = InMemoryStore::default();
    create_usecase(&store).execute(ann(vec![])).await.unwrap();

    let result = create_usecase(&store).execute(ann(vec![])).await;

    assert!(
        matches!(result, Err(UsersServiceError::EmailAlreadyExists)),
        "expected EmailAlreadyExists, got {result:?}"
    );
    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn should_list_users_with_their_own_courses() {
    let rust = course("Rust", 1, vec![]);
    let go = course("Go", 2, vec![]);
    let store = InMemoryStore::with_courses(vec![rust.clone(), go.clone()]);
    let ann = create_usecase(&store).execute(ann(vec![rust.id])).await.unwrap();
    let bob = create_usecase(&store)
        .execute(CreateUserInput {
            name: "Bob".to_owned(),
            email: "bob@x.com".to_owned(),
            password: "pw456".to_owned(),
            role: Some(UserRole::Admin),
            assigned_course_ids: vec![go.id],
        })
        .await
        .unwrap();

    let users = ListUsersUseCase {
        users: store.clone(),
        enrollments: store.clone(),
    }
    .execute()
    .await
    .unwrap();

    assert_eq!(users, vec![ann, bob]);
    assert_eq!(users[0].assigned_courses[0].title, "Rust");
    assert_eq!(users[1].assigned_courses[0].title, "Go");
}

#[tokio::test]
async fn should_update_status_and_keep_other_fields() {
    let store = InMemoryStore::default();
    let created = create_usecase(&store).execute(ann(vec![])).await.unwrap();

    let profile = UpdateUserStatusUseCase {
        users: store.clone(),
    }
    .execute(created.profile.id, UserStatus::Banned)
    .await
    .unwrap();
    let found = get_usecase(&store).execute(created.profile.id).await.unwrap();

    assert_eq!(profile.status, UserStatus::Banned);
    assert_eq!(found.profile.status, UserStatus::Banned);
    assert_eq!(found.profile.name, created.profile.name);
    assert_eq!(found.profile.email, created.profile.email);
    assert_eq!(found.profile.role, created.profile.role);
    assert_eq!(found.profile.created_at, created.profile.created_at);
}

#[tokio::test]
async fn should_clear_courses_with_empty_assignment() {
    let c1 = course("Rust", 1, vec![]);
    let store = InMemoryStore::with_courses(vec![c1.clone()]);
    let created = create_usecase(&store).execute(ann(vec![c1.id])).await.unwrap();

    let updated = update_usecase(&store)
        .execute(
            created.profile.id,
            UpdateUserInput {
                courses: Some(vec![]).into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(updated.assigned_courses.is_empty());
    assert!(store.linked_course_ids(created.profile.id).is_empty());
}

#[tokio::test]
async fn should_keep_courses_when_assignment_omitted() {
    let c1 = course("Rust", 1, vec![]);
    let store = InMemoryStore::with_courses(vec![c1.clone()]);
    let created = create_usecase(&store).execute(ann(vec![c1.id])).await.unwrap();

    let updated = update_usecase(&store)
        .execute(created.profile.id, UpdateUserInput::default())
        .await
        .unwrap();

    assert_eq!(updated.assigned_courses, created.assigned_courses);
    assert_eq!(store.linked_course_ids(created.profile.id), vec![c1.id]);
}

#[tokio::test]
async fn should_replace_courses_with_given_ids() {
    let rust = course("Rust", 1, vec![]);
    let go = course("Go", 2, vec![]);
    let store = InMemoryStore::with_courses(vec![rust.clone(), go.clone()]);
    let created = create_usecase(&store).execute(ann(vec![rust.id])).await.unwrap();

    let updated = update_usecase(&store)
        .execute(
            created.profile.id,
            UpdateUserInput {
                name: Some("Ann Lee".to_owned()),
                password: Some("new-pw".to_owned()),
                courses: Some(vec![go.id]).into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.profile.name, "Ann Lee");
    assert_eq!(store.linked_course_ids(created.profile.id), vec![go.id]);
    assert_eq!(
        store.stored_user(created.profile.id).unwrap().password_hash,
        "hashed:new-pw"
    );
}

#[tokio::test]
async fn should_reject_email_taken_by_another_user_on_update() {
    let store = InMemoryStore::default();
    create_usecase(&store).execute(ann(vec![])).await.unwrap();
    let bob = create_usecase(&store)
        .execute(CreateUserInput {
            name: "Bob".to_owned(),
            email: "bob@x.com".to_owned(),
            ..ann(vec![])
        })
        .await
        .unwrap();

    let result = update_usecase(&store)
        .execute(
            bob.profile.id,
            UpdateUserInput {
                email: Some("ann@x.com".to_owned()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(UsersServiceError::EmailAlreadyExists)));
    assert_eq!(store.stored_user(bob.profile.id).unwrap().email, "bob@x.com");
}

#[tokio::test]
async fn should_return_not_found_for_missing_user_without_state_change() {
    let store = InMemoryStore::default();
    let existing = create_usecase(&store).execute(ann(vec![])).await.unwrap();
    let missing = Uuid::now_v7();

    let fetched = get_usecase(&store).execute(missing).await;
    let updated = update_usecase(&store)
        .execute(
            missing,
            UpdateUserInput {
                name: Some("Ghost".to_owned()),
                ..Default::default()
            },
        )
        .await;
    let status = UpdateUserStatusUseCase {
        users: store.clone(),
    }
    .execute(missing, UserStatus::Inactive)
    .await;
    let deleted = DeleteUserUseCase {
        users: store.clone(),
    }
    .execute(missing)
    .await;

    assert!(matches!(fetched, Err(UsersServiceError::UserNotFound)));
    assert!(matches!(updated, Err(UsersServiceError::UserNotFound)));
    assert!(matches!(status, Err(UsersServiceError::UserNotFound)));
    assert!(matches!(deleted, Err(UsersServiceError::UserNotFound)));
    assert_eq!(store.user_count(), 1);
    let unchanged = get_usecase(&store).execute(existing.profile.id).await.unwrap();
    assert_eq!(unchanged, existing);
}

#[tokio::test]
async fn should_delete_user_and_detach_courses() {
    let c1 = course("Rust", 1, vec![]);
    let store = InMemoryStore::with_courses(vec![c1.clone()]);
    let created = create_usecase(&store).execute(ann(vec![c1.id])).await.unwrap();

    let deleted = DeleteUserUseCase {
        users: store.clone(),
    }
    .execute(created.profile.id)
    .await
    .unwrap();

    assert_eq!(deleted, created.profile);
    assert_eq!(store.user_count(), 0);
    assert!(store.linked_course_ids(created.profile.id).is_empty());
    let again = get_usecase(&store).execute(created.profile.id).await;
    assert!(matches!(again, Err(UsersServiceError::UserNotFound)));
}

#[tokio::test]
async fn should_expose_password_hash_only_through_credentials_lookup() {
    let store = InMemoryStore::default();
    let created = create_usecase(&store).execute(ann(vec![])).await.unwrap();

    let credentials = FindUserCredentialsUseCase {
        users: store.clone(),
    }
    .execute("ann@x.com")
    .await
    .unwrap();

    assert_eq!(credentials.id, created.profile.id);
    assert_eq!(credentials.password_hash, "hashed:pw123");
}
