//! Active role persistence through the file-backed store.

use proptest::prelude::*;
use warden_authz::{evaluate, Role, RoleRegistry};
use warden_session::{ActiveRoleStore, FileStore, StateStore, ACTIVE_ROLE_KEY};
use warden_test_utils::{assert_ok, grants_strategy, role_json, temp_dir};

#[test]
fn assumed_role_survives_reopen() {
    let dir = temp_dir();
    let registry = RoleRegistry::builtin();
    let developer = registry.get("developer").unwrap();

    let mut first = ActiveRoleStore::new(FileStore::in_dir(dir.path(), "state.json"));
    assert_ok!(first.store(developer));

    let second = ActiveRoleStore::new(FileStore::in_dir(dir.path(), "state.json"));
    let loaded = assert_ok!(second.load()).expect("role persisted");
    assert_eq!(&loaded, developer);
    assert!(evaluate(Some(&loaded), "s3", "upload"));
    assert!(!evaluate(Some(&loaded), "s3", "delete"));
}

#[test]
fn hand_written_role_json_loads() {
    let dir = temp_dir();
    let mut files = FileStore::in_dir(dir.path(), "state.json");
    let json = role_json("auditor", "Auditor", &[("s3", &["read"]), ("route53", &["read"])]);
    files.set(ACTIVE_ROLE_KEY, &json.to_string()).unwrap();

    let role = ActiveRoleStore::new(files).load().unwrap().unwrap();
    assert_eq!(role.name, "Auditor");
    assert_eq!(role.service_count(), 2);
}

#[test]
fn state_file_layout() {
    let dir = temp_dir();
    let mut holder = ActiveRoleStore::new(FileStore::in_dir(dir.path(), "state.json"));
    holder.store(RoleRegistry::builtin().get("readonly").unwrap()).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("state.json")).unwrap();
    let outer: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let inner: serde_json::Value =
        serde_json::from_str(outer[ACTIVE_ROLE_KEY].as_str().unwrap()).unwrap();
    assert_eq!(inner["id"], "readonly");
    assert_eq!(inner["permissions"]["lambda"], serde_json::json!(["logs", "read"]));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_role_roundtrips_through_file(grants in grants_strategy(6)) {
        let dir = temp_dir();
        let mut role = Role::new("generated", "Generated", "");
        role.permissions = grants;

        let mut holder = ActiveRoleStore::new(FileStore::in_dir(dir.path(), "state.json"));
        holder.store(&role).unwrap();
        prop_assert_eq!(holder.load().unwrap(), Some(role));
    }
}
