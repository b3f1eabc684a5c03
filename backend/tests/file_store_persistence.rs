//! Integration tests for the directory-backed store behind the service.

use std::fs;
use std::sync::Arc;

use camino::Utf8PathBuf;
use leadboard::domain::{
    ErrorCode, InitOutcome, LeadDataService, PayloadPolicy, RecordStore, Role, UpdateOutcome,
    UserPatch,
};
use leadboard::outbound::{FileStore, RandomSeedSource};
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct DataDir {
    _tmp: TempDir,
    path: Utf8PathBuf,
}

#[fixture]
fn data_dir() -> DataDir {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = Utf8PathBuf::from_path_buf(tmp.path().join("leadboard-data")).expect("utf-8 path");
    DataDir { _tmp: tmp, path }
}

fn service(
    data_dir: &DataDir,
    seed: u64,
    policy: PayloadPolicy,
) -> LeadDataService<FileStore, RandomSeedSource> {
    let store = FileStore::open(&data_dir.path).expect("open store");
    LeadDataService::new(
        RecordStore::new(Arc::new(store), policy),
        Arc::new(RandomSeedSource::new(Some(seed))),
    )
}

#[rstest]
fn seeded_data_survives_a_reopen(data_dir: DataDir) {
    let first = service(&data_dir, 42, PayloadPolicy::FailOpen);
    assert_eq!(
        first.initialize_data().expect("seed"),
        InitOutcome::Seeded { count: 30 }
    );
    let users = first.get_users().expect("users");
    let leads = first.get_leads().expect("leads");

    let reopened = service(&data_dir, 7, PayloadPolicy::FailOpen);
    assert_eq!(
        reopened.initialize_data().expect("no reseed"),
        InitOutcome::AlreadyPresent
    );
    assert_eq!(reopened.get_users().expect("users"), users);
    assert_eq!(reopened.get_leads().expect("leads"), leads);
}

#[rstest]
fn updates_are_visible_after_a_reopen(data_dir: DataDir) {
    let first = service(&data_dir, 42, PayloadPolicy::FailOpen);
    first.initialize_data().expect("seed");
    let bob = first
        .get_users()
        .expect("users")
        .into_iter()
        .find(|user| user.username == "bob")
        .expect("bob seeded");

    let outcome = first
        .update_user(&bob.id, &UserPatch::default().with_role(Role::Manager))
        .expect("update");
    assert_eq!(outcome, UpdateOutcome::Applied);

    let reopened = service(&data_dir, 42, PayloadPolicy::FailOpen);
    let stored = reopened
        .get_users()
        .expect("users")
        .into_iter()
        .find(|user| user.id == bob.id)
        .expect("bob stored");
    assert_eq!(stored.role, Role::Manager);
}

#[rstest]
fn malformed_payloads_read_as_empty_when_failing_open(data_dir: DataDir) {
    fs::create_dir_all(&data_dir.path).expect("mkdir");
    fs::write(data_dir.path.join("leads.json"), "{not json").expect("write garbage");

    let service = service(&data_dir, 42, PayloadPolicy::FailOpen);
    assert!(service.get_leads().expect("fail open").is_empty());
}

#[rstest]
fn malformed_payloads_are_errors_under_strict_policy(data_dir: DataDir) {
    fs::create_dir_all(&data_dir.path).expect("mkdir");
    fs::write(data_dir.path.join("users.json"), "[{\"id\": 1}]").expect("write garbage");

    let service = service(&data_dir, 42, PayloadPolicy::Strict);
    let err = service.get_users().expect_err("strict read fails");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
fn a_malformed_payload_is_not_reseeded(data_dir: DataDir) {
    fs::create_dir_all(&data_dir.path).expect("mkdir");
    fs::write(data_dir.path.join("users.json"), "garbage").expect("write garbage");

    let service = service(&data_dir, 42, PayloadPolicy::FailOpen);
    service.initialize_users().expect("initialise");
    let on_disk = fs::read_to_string(data_dir.path.join("users.json")).expect("read");
    assert_eq!(on_disk, "garbage");
}
