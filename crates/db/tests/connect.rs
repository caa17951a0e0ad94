//! Integration tests for opening the datastore from configuration.
//!
//! Unlike the repository tests, these start from a path with no database
//! file, so pool creation, the health check, and the embedded migrations
//! all run for real.

use chrono::Utc;
use students_core::student::years_before;
use students_db::models::student::CreateStudent;
use students_db::repositories::StudentRepo;
use students_db::DbConfig;

fn joe() -> CreateStudent {
    CreateStudent {
        name: Some("Joe".to_string()),
        surnames: Some("Ironhack".to_string()),
        birthday: Some(years_before(Utc::now(), 20)),
        website: Some("http://ironhack.com".to_string()),
        number_of_dogs: Some(1),
    }
}

#[tokio::test]
async fn connect_creates_and_migrates_a_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.sqlite");
    assert!(!path.exists());

    let config = DbConfig::new(format!("sqlite://{}", path.display()));
    let pool = students_db::connect(&config).await.unwrap();
    assert!(path.exists());

    let input = joe();
    let saved = StudentRepo::save(&pool, &input, Utc::now()).await.unwrap();
    let found = StudentRepo::find_by_id(&pool, saved.id).await.unwrap();
    assert_eq!(found.map(|row| row.snapshot()), Some(input.snapshot()));

    pool.close().await;
}

#[tokio::test]
async fn reconnecting_keeps_stored_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::new(format!(
        "sqlite://{}",
        dir.path().join("students.sqlite").display()
    ));

    let pool = students_db::connect(&config).await.unwrap();
    let saved = StudentRepo::save(&pool, &joe(), Utc::now()).await.unwrap();
    pool.close().await;

    // Second connect re-runs migrations against an already migrated file.
    let pool = students_db::connect(&config).await.unwrap();
    let found = StudentRepo::find_by_id(&pool, saved.id).await.unwrap();
    assert!(found.is_some());
    pool.close().await;
}

#[tokio::test]
async fn connect_fails_when_the_directory_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("students.sqlite");
    let config = DbConfig::new(format!("sqlite://{}", path.display()));

    assert!(students_db::connect(&config).await.is_err());
    assert!(!path.exists());
}
