//! Integration tests for request guards.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};

use common::*;
use portal_auth::{AuthContext, AuthError, JwtService};
use portal_authz::{Guard, ResolverConfig, UserAction};
use portal_rbac::{permissions, ResourceRef, Role};

#[tokio::test]
async fn test_require_allows_and_forbids() {
    let fixture = TestFixture::new().await;
    let guard = Guard::new(fixture.resolver());
    let ctx = fixture.context(SOFTWARE_ADMIN).await;

    guard
        .require(&ctx, permissions::DEPARTMENT_EDIT, Some(&ResourceRef::department(7)))
        .await
        .unwrap();

    let err = guard
        .require(&ctx, permissions::DEPARTMENT_EDIT, Some(&ResourceRef::department(8)))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Forbidden));
    assert_eq!(err.status_code(), 403);
}

#[tokio::test]
async fn test_refresh_sees_deactivation() {
    let fixture = TestFixture::new().await;
    let ctx = fixture.context(EDITOR).await;

    fixture.store.deactivate_user(EDITOR).await;

    let refreshing = Guard::new(fixture.resolver());
    let err = refreshing
        .require(&ctx, permissions::NEWS_CREATE, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::AccountDisabled));

    // Trusting the token context keeps the stale view
    let trusting = Guard::new(fixture.resolver_with(ResolverConfig::default().trusting_tokens()));
    trusting
        .require(&ctx, permissions::NEWS_CREATE, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_refresh_uses_stored_role() {
    let fixture = TestFixture::new().await;
    let guard = Guard::new(fixture.resolver());

    // Token claims super admin, stored row is an editor
    let forged = AuthContext::new(EDITOR, Role::SuperAdmin);
    let err = guard
        .require(&forged, permissions::USER_MANAGE, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Forbidden));
}

#[tokio::test]
async fn test_unknown_subject_is_unauthorized() {
    let fixture = TestFixture::new().await;
    let guard = Guard::new(fixture.resolver());

    let ctx = AuthContext::new(UNKNOWN_USER, Role::Editor);
    let err = guard
        .require(&ctx, permissions::NEWS_CREATE, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Unauthorized(_)));
}

#[tokio::test]
async fn test_inactive_token_context_is_rejected() {
    let fixture = TestFixture::new().await;
    let guard = Guard::new(fixture.resolver_with(ResolverConfig::default().trusting_tokens()));

    let ctx = AuthContext::new(ROOT, Role::SuperAdmin).inactive();
    let err = guard.require_admin(&ctx).await.unwrap_err();
    assert!(matches!(err, AuthError::AccountDisabled));
}

#[tokio::test]
async fn test_require_admin() {
    let fixture = TestFixture::new().await;
    let guard = Guard::new(fixture.resolver());

    for user_id in [ROOT, ENGINEERING_ADMIN, SOFTWARE_ADMIN, AI_HOUSE_ADMIN] {
        let ctx = fixture.context(user_id).await;
        guard.require_admin(&ctx).await.unwrap();
    }

    for user_id in [EDITOR, COMPUTING_VIEWER] {
        let ctx = fixture.context(user_id).await;
        let err = guard.require_admin(&ctx).await.unwrap_err();
        assert!(matches!(err, AuthError::AdminRequired));
    }
}

#[tokio::test]
async fn test_self_protection_applies_to_super_admin() {
    let fixture = TestFixture::new().await;
    let guard = Guard::new(fixture.resolver());
    let root = fixture.context(ROOT).await;

    for action in [UserAction::Deactivate, UserAction::Delete] {
        let err = guard
            .require_manage_user(&root, ROOT, action)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::SelfManagement(_)));
        assert_eq!(err.status_code(), 400);
    }

    guard
        .require_manage_user(&root, ROOT, UserAction::Update)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_require_manage_user() {
    let fixture = TestFixture::new().await;
    let guard = Guard::new(fixture.resolver());
    let college_admin = fixture.context(ENGINEERING_ADMIN).await;

    guard
        .require_manage_user(&college_admin, CIVIL_EDITOR, UserAction::Delete)
        .await
        .unwrap();

    let err = guard
        .require_manage_user(&college_admin, MEDICINE_ADMIN, UserAction::Update)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Forbidden));

    // Non-super-admins never manage themselves
    let err = guard
        .require_manage_user(&college_admin, ENGINEERING_ADMIN, UserAction::Update)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Forbidden));
}

#[tokio::test]
async fn test_guarded_runs_handler_only_when_allowed() {
    let fixture = TestFixture::new().await;
    let guard = Guard::new(fixture.resolver());
    let ctx = fixture.context(EDITOR).await;
    let flag = AtomicBool::new(false);
    let ran = &flag;

    let result = guard
        .guarded(&ctx, permissions::NEWS_MANAGE, None, move || async move {
            ran.store(true, Ordering::SeqCst);
            Ok(())
        })
        .await;
    assert!(matches!(result, Err(AuthError::Forbidden)));
    assert!(!ran.load(Ordering::SeqCst));

    let value = guard
        .guarded(&ctx, permissions::NEWS_CREATE, None, move || async move {
            ran.store(true, Ordering::SeqCst);
            Ok(7)
        })
        .await
        .unwrap();
    assert_eq!(value, 7);
    assert!(ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_store_outage_rejects() {
    let fixture = TestFixture::new().await;
    let guard = Guard::new(fixture.resolver());
    let root = fixture.context(ROOT).await;

    fixture.store.set_unavailable(true);

    let err = guard
        .require(&root, permissions::NEWS_CREATE, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::AuthorizationUnavailable(_)));
    assert_eq!(err.status_code(), 503);
    assert!(err.is_server_error());

    let err = guard
        .require_manage_user(&root, EDITOR, UserAction::Update)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::AuthorizationUnavailable(_)));
}

#[tokio::test]
async fn test_token_to_guard_flow() {
    let fixture = TestFixture::new().await;
    let guard = Guard::new(fixture.resolver());
    let jwt = JwtService::with_secret("integration-test-secret").unwrap();

    let record = {
        use portal_authz::AuthorizationStore;
        fixture.store.get_user(SOFTWARE_ADMIN).await.unwrap().unwrap()
    };
    let token = jwt.generate_access_token(&record).unwrap();
    let ctx = jwt
        .authenticate_header(&format!("Bearer {}", token))
        .unwrap();

    assert_eq!(ctx.user_id, SOFTWARE_ADMIN);
    guard
        .require(&ctx, permissions::DEPARTMENT_EDIT, Some(&ResourceRef::department(7)))
        .await
        .unwrap();
    assert!(guard
        .require(&ctx, permissions::DEPARTMENT_EDIT, Some(&ResourceRef::department(8)))
        .await
        .is_err());
}
