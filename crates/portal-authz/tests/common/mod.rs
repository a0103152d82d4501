//! Shared fixture for the authorization integration tests.
//!
//! Organizational tree:
//!
//! ```text
//! college 1 (Engineering)
//!   faculty 3 (Computing)    -> departments 7, 9
//!   faculty 4 (Civil)        -> department 8
//!   faculty 6 (inactive)
//! college 2 (Medicine)
//!   faculty 5 (Surgery)      -> departments 10, 42
//! ```

#![allow(dead_code)]

use std::sync::Arc;

use portal_auth::AuthContext;
use portal_authz::{AuthorizationStore, MemoryStore, Resolver, ResolverConfig};
use portal_org::{College, Department, Faculty, UserId, UserRecord};
use portal_rbac::Role;

pub const ROOT: UserId = 1;
pub const ENGINEERING_ADMIN: UserId = 2;
pub const COMPUTING_ADMIN: UserId = 3;
pub const SOFTWARE_ADMIN: UserId = 4;
pub const EDITOR: UserId = 5;
pub const COMPUTING_VIEWER: UserId = 6;
pub const MEDICINE_ADMIN: UserId = 7;
pub const DISABLED_ROOT: UserId = 8;
pub const CIVIL_ADMIN: UserId = 9;
pub const AI_HOUSE_ADMIN: UserId = 10;
pub const CIVIL_EDITOR: UserId = 11;
pub const DETACHED_COLLEGE_ADMIN: UserId = 12;
pub const UNKNOWN_USER: UserId = 999;

/// Test fixture holding a seeded store.
pub struct TestFixture {
    /// Shared in-memory store.
    pub store: Arc<MemoryStore>,
}

impl TestFixture {
    /// Create a fixture with the standard organization and users.
    pub async fn new() -> Self {
        init_tracing();

        let store = Arc::new(MemoryStore::new());

        store.insert_college(College::new(1, "Engineering").with_code("ENG")).await;
        store.insert_college(College::new(2, "Medicine").with_code("MED")).await;

        store.insert_faculty(Faculty::new(3, 1, "Computing")).await;
        store.insert_faculty(Faculty::new(4, 1, "Civil")).await;
        store.insert_faculty(Faculty::new(5, 2, "Surgery")).await;
        store
            .insert_faculty(Faculty::new(6, 1, "Mining").deactivated())
            .await;

        store.insert_department(Department::new(7, 3, "Software")).await;
        store.insert_department(Department::new(9, 3, "Networks")).await;
        store.insert_department(Department::new(8, 4, "Structures")).await;
        store.insert_department(Department::new(10, 5, "Cardiology")).await;
        store.insert_department(Department::new(42, 5, "Anatomy")).await;

        let users = [
            UserRecord::new(ROOT, "root", "root@uni.edu", Role::SuperAdmin),
            UserRecord::new(ENGINEERING_ADMIN, "eng", "eng@uni.edu", Role::CollegeAdmin)
                .with_college(1),
            UserRecord::new(COMPUTING_ADMIN, "cs", "cs@uni.edu", Role::FacultyAdmin)
                .with_college(1)
                .with_faculty(3),
            UserRecord::new(SOFTWARE_ADMIN, "se", "se@uni.edu", Role::DepartmentAdmin)
                .with_college(1)
                .with_faculty(3)
                .with_department(7),
            UserRecord::new(EDITOR, "editor", "editor@uni.edu", Role::Editor),
            UserRecord::new(COMPUTING_VIEWER, "viewer", "viewer@uni.edu", Role::Viewer)
                .with_college(1)
                .with_faculty(3),
            UserRecord::new(MEDICINE_ADMIN, "med", "med@uni.edu", Role::CollegeAdmin)
                .with_college(2),
            UserRecord::new(DISABLED_ROOT, "old-root", "old-root@uni.edu", Role::SuperAdmin)
                .deactivated(),
            UserRecord::new(CIVIL_ADMIN, "civil", "civil@uni.edu", Role::FacultyAdmin)
                .with_college(1)
                .with_faculty(4),
            UserRecord::new(AI_HOUSE_ADMIN, "ai", "ai@uni.edu", Role::AiHouseAdmin),
            UserRecord::new(CIVIL_EDITOR, "civil-ed", "civil-ed@uni.edu", Role::Editor)
                .with_college(1)
                .with_faculty(4),
            UserRecord::new(DETACHED_COLLEGE_ADMIN, "ca", "ca@uni.edu", Role::CollegeAdmin),
        ];
        for user in users {
            store.insert_user(user).await;
        }

        Self { store }
    }

    /// Resolver with default settings.
    pub fn resolver(&self) -> Resolver<MemoryStore> {
        Resolver::new(Arc::clone(&self.store))
    }

    /// Resolver with explicit settings.
    pub fn resolver_with(&self, config: ResolverConfig) -> Resolver<MemoryStore> {
        Resolver::with_config(Arc::clone(&self.store), config)
    }

    /// Context built from the stored row, as a token would carry it.
    pub async fn context(&self, user_id: UserId) -> AuthContext {
        let record = self.store.get_user(user_id).await.unwrap().unwrap();
        AuthContext::from_record(&record).unwrap()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("portal_authz=debug")
        .with_test_writer()
        .try_init();
}
