//! In-memory authorization store
//!
//! Holds users, the organizational hierarchy and explicit grants in
//! process memory. Suitable for tests and single-process deployments.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use portal_org::{College, Department, DepartmentLineage, ExplicitGrant, Faculty, UserId, UserRecord};
use portal_rbac::{ResourceId, ResourceRef, ResourceType};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::store::{AuthorizationStore, GrantStore, ScopeFilter};

/// In-memory implementation of [`AuthorizationStore`] and [`GrantStore`].
#[derive(Clone)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<UserId, UserRecord>>>,
    colleges: Arc<RwLock<HashMap<ResourceId, College>>>,
    faculties: Arc<RwLock<HashMap<ResourceId, Faculty>>>,
    departments: Arc<RwLock<HashMap<ResourceId, Department>>>,
    grants: Arc<RwLock<Vec<ExplicitGrant>>>,
    /// When set, every read fails with a connection error
    unavailable: Arc<AtomicBool>,
    /// Number of reads served
    lookups: Arc<AtomicU64>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("unavailable", &self.unavailable.load(Ordering::Relaxed))
            .field("lookups", &self.lookups.load(Ordering::Relaxed))
            .finish()
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            colleges: Arc::new(RwLock::new(HashMap::new())),
            faculties: Arc::new(RwLock::new(HashMap::new())),
            departments: Arc::new(RwLock::new(HashMap::new())),
            grants: Arc::new(RwLock::new(Vec::new())),
            unavailable: Arc::new(AtomicBool::new(false)),
            lookups: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Insert or replace a user.
    pub async fn insert_user(&self, user: UserRecord) {
        self.users.write().await.insert(user.id, user);
    }

    /// Insert or replace a college.
    pub async fn insert_college(&self, college: College) {
        self.colleges.write().await.insert(college.id, college);
    }

    /// Insert or replace a faculty.
    pub async fn insert_faculty(&self, faculty: Faculty) {
        self.faculties.write().await.insert(faculty.id, faculty);
    }

    /// Insert or replace a department.
    pub async fn insert_department(&self, department: Department) {
        self.departments.write().await.insert(department.id, department);
    }

    /// Deactivate a user in place.
    ///
    /// # Returns
    ///
    /// `false` if the user does not exist
    pub async fn deactivate_user(&self, user_id: UserId) -> bool {
        match self.users.write().await.get_mut(&user_id) {
            Some(user) => {
                user.is_active = false;
                true
            }
            None => false,
        }
    }

    /// Simulate an outage of the backing source.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of reads served since creation.
    pub fn lookups(&self) -> u64 {
        self.lookups.load(Ordering::SeqCst)
    }

    fn begin_read(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("memory store marked unavailable".to_string()));
        }
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn faculty_college(&self, faculty_id: ResourceId) -> Option<ResourceId> {
        self.faculties.read().await.get(&faculty_id).map(|f| f.college_id)
    }

    async fn lineage(&self, department_id: ResourceId) -> Option<DepartmentLineage> {
        let faculty_id = self.departments.read().await.get(&department_id)?.faculty_id;
        let college_id = self.faculty_college(faculty_id).await?;
        Some(DepartmentLineage {
            faculty_id,
            college_id,
        })
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthorizationStore for MemoryStore {
    async fn get_user(&self, user_id: UserId) -> StoreResult<Option<UserRecord>> {
        self.begin_read()?;
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn get_faculty_college(&self, faculty_id: ResourceId) -> StoreResult<Option<ResourceId>> {
        self.begin_read()?;
        Ok(self.faculty_college(faculty_id).await)
    }

    async fn get_department_lineage(
        &self,
        department_id: ResourceId,
    ) -> StoreResult<Option<DepartmentLineage>> {
        self.begin_read()?;
        Ok(self.lineage(department_id).await)
    }

    async fn has_explicit_grant(
        &self,
        user_id: UserId,
        resource: &ResourceRef,
        permission: &str,
    ) -> StoreResult<bool> {
        self.begin_read()?;
        let grants = self.grants.read().await;
        Ok(grants.iter().any(|g| g.matches(user_id, resource, permission)))
    }

    async fn list_active_resource_ids(
        &self,
        resource_type: ResourceType,
        filter: Option<ScopeFilter>,
    ) -> StoreResult<BTreeSet<ResourceId>> {
        self.begin_read()?;

        let ids = match resource_type {
            ResourceType::College => self
                .colleges
                .read()
                .await
                .values()
                .filter(|c| c.is_active)
                .filter(|c| match filter {
                    None => true,
                    Some(ScopeFilter::UnderCollege(id)) => c.id == id,
                    Some(ScopeFilter::UnderFaculty(_)) => false,
                })
                .map(|c| c.id)
                .collect(),
            ResourceType::Faculty => self
                .faculties
                .read()
                .await
                .values()
                .filter(|f| f.is_active)
                .filter(|f| match filter {
                    None => true,
                    Some(ScopeFilter::UnderCollege(id)) => f.college_id == id,
                    Some(ScopeFilter::UnderFaculty(id)) => f.id == id,
                })
                .map(|f| f.id)
                .collect(),
            ResourceType::Department => {
                let active: Vec<(ResourceId, ResourceId)> = self
                    .departments
                    .read()
                    .await
                    .values()
                    .filter(|d| d.is_active)
                    .map(|d| (d.id, d.faculty_id))
                    .collect();

                let mut ids = BTreeSet::new();
                for (id, faculty_id) in active {
                    let keep = match filter {
                        None => true,
                        Some(ScopeFilter::UnderFaculty(f)) => faculty_id == f,
                        Some(ScopeFilter::UnderCollege(c)) => {
                            self.faculty_college(faculty_id).await == Some(c)
                        }
                    };
                    if keep {
                        ids.insert(id);
                    }
                }
                ids
            }
            _ => BTreeSet::new(),
        };

        Ok(ids)
    }
}

#[async_trait]
impl GrantStore for MemoryStore {
    async fn insert_grant(&self, grant: ExplicitGrant) -> StoreResult<()> {
        self.begin_read()?;
        let mut grants = self.grants.write().await;
        grants.retain(|g| !g.matches(grant.user_id, &grant.resource, grant.permission.as_str()));
        grants.push(grant);
        Ok(())
    }

    async fn delete_grant(
        &self,
        user_id: UserId,
        resource: &ResourceRef,
        permission: &str,
    ) -> StoreResult<bool> {
        self.begin_read()?;
        let mut grants = self.grants.write().await;
        let before = grants.len();
        grants.retain(|g| !g.matches(user_id, resource, permission));
        Ok(grants.len() != before)
    }

    async fn list_grants(&self, user_id: UserId) -> StoreResult<Vec<ExplicitGrant>> {
        self.begin_read()?;
        let grants = self.grants.read().await;
        Ok(grants.iter().filter(|g| g.user_id == user_id).cloned().collect())
    }
}
