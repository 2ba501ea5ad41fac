use uuid::Uuid;

use academy_users::error::UsersServiceError;
use academy_users::usecase::enrollment::{AssignCoursesUseCase, GetUserCoursesUseCase};
use academy_users::usecase::user::{CreateUserInput, CreateUserUseCase};

use crate::helpers::{InMemoryStore, PrefixHasher, course, lesson, module};

async fn create_user(store: &InMemoryStore, course_ids: Vec<Uuid>) -> Uuid {
    CreateUserUseCase {
        users: store.clone(),
        enrollments: store.clone(),
        hasher: PrefixHasher,
    }
    .execute(CreateUserInput {
        name: "Ann".to_owned(),
        email: "ann@x.com".to_owned(),
        password: "pw123".to_owned(),
        role: None,
        assigned_course_ids: course_ids,
    })
    .await
    .unwrap()
    .profile
    .id
}

fn courses_usecase(store: &InMemoryStore) -> GetUserCoursesUseCase<InMemoryStore, InMemoryStore> {
    GetUserCoursesUseCase {
        users: store.clone(),
        enrollments: store.clone(),
    }
}

#[tokio::test]
async fn should_return_exactly_the_assigned_course_expanded() {
    let c1 = course(
        "Rust",
        1,
        vec![module("Basics", 1, vec![lesson("Hello", 1), lesson("Types", 2)])],
    );
    let other = course("Go", 2, vec![]);
    let store = InMemoryStore::with_courses(vec![c1.clone(), other]);
    let user_id = create_user(&store, vec![c1.id]).await;

    let courses = courses_usecase(&store).execute(user_id).await.unwrap();

    assert_eq!(courses, vec![c1]);
    assert_eq!(courses[0].modules[0].lessons.len(), 2);
}

#[tokio::test]
async fn should_order_courses_modules_and_lessons() {
    let older = course(
        "Older",
        1,
        vec![
            module("Third", 3, vec![]),
            module("First", 1, vec![lesson("1b", 2), lesson("1a", 1)]),
            module("Second", 2, vec![lesson("2c", 9), lesson("2a", 0), lesson("2b", 5)]),
        ],
    );
    let newest = course("Newest", 20, vec![]);
    let middle = course("Middle", 10, vec![]);
    let store =
        InMemoryStore::with_courses(vec![older.clone(), newest.clone(), middle.clone()]);
    let user_id = create_user(&store, vec![older.id, newest.id, middle.id]).await;

    let courses = courses_usecase(&store).execute(user_id).await.unwrap();

    let titles: Vec<_> = courses.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["Newest", "Middle", "Older"]);

    let modules: Vec<_> = courses[2].modules.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(modules, ["First", "Second", "Third"]);

    let first: Vec<_> = courses[2].modules[0]
        .lessons
        .iter()
        .map(|l| l.title.as_str())
        .collect();
    let second: Vec<_> = courses[2].modules[1]
        .lessons
        .iter()
        .map(|l| l.title.as_str())
        .collect();
    assert_eq!(first, ["1a", "1b"]);
    assert_eq!(second, ["2a", "2b", "2c"]);
}

#[tokio::test]
async fn should_return_empty_curriculum_for_user_without_courses() {
    let store = InMemoryStore::with_courses(vec![course("Rust", 1, vec![])]);
    let user_id = create_user(&store, vec![]).await;

    let courses = courses_usecase(&store).execute(user_id).await.unwrap();

    assert!(courses.is_empty());
}

#[tokio::test]
async fn should_return_not_found_for_unknown_user_courses() {
    let store = InMemoryStore::default();

    let result = courses_usecase(&store).execute(Uuid::now_v7()).await;

    assert!(
        matches!(result, Err(UsersServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_add_courses_without_removing_existing_ones() {
    let rust = course("Rust", 1, vec![]);
    let go = course("Go", 2, vec![]);
    let store = InMemoryStore::with_courses(vec![rust.clone(), go.clone()]);
    let user_id = create_user(&store, vec![rust.id]).await;

    let user = AssignCoursesUseCase {
        users: store.clone(),
        enrollments: store.clone(),
    }
    .execute(user_id, &[go.id, rust.id])
    .await
    .unwrap();

    assert_eq!(user.assigned_courses.len(), 2);
    assert_eq!(store.linked_course_ids(user_id), vec![rust.id, go.id]);
}

#[tokio::test]
async fn should_reject_assignment_to_unknown_course() {
    let rust = course("Rust", 1, vec![]);
    let store = InMemoryStore::with_courses(vec![rust.clone()]);
    let user_id = create_user(&store, vec![rust.id]).await;

    let result = AssignCoursesUseCase {
        users: store.clone(),
        enrollments: store.clone(),
    }
    .execute(user_id, &[Uuid::now_v7()])
    .await;

    assert!(matches!(result, Err(UsersServiceError::InvalidCourseReference)));
    assert_eq!(store.linked_course_ids(user_id), vec![rust.id]);
}

#[tokio::test]
async fn should_reject_assignment_for_unknown_user() {
    let rust = course("Rust", 1, vec![]);
    let store = InMemoryStore::with_courses(vec![rust.clone()]);

    let result = AssignCoursesUseCase {
        users: store.clone(),
        enrollments: store.clone(),
    }
    .execute(Uuid::now_v7(), &[rust.id])
    .await;

    assert!(matches!(result, Err(UsersServiceError::UserNotFound)));
}
