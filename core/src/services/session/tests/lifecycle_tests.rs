//! Tests for touch, destroy and liveness checks

use std::time::Duration;

use crate::domain::{Claims, Secret, SignOptions, VerifyOptions};
use crate::repositories::SessionRegistry;
use crate::services::session::tests::mocks::{create_test_manager, SECRET};

fn secret() -> Secret {
    Secret::from(SECRET)
}

fn user() -> Claims {
    Claims::new().with("userId", "1")
}

#[tokio::test]
async fn test_destroy_is_idempotent() {
    let manager = create_test_manager();
    let token = manager.sign(&user(), &secret(), &SignOptions::new()).await.unwrap();

    manager.destroy(&token).await.unwrap();
    manager.destroy(&token).await.unwrap();

    assert!(manager.registry().is_empty().await);
}

#[tokio::test]
async fn test_destroy_malformed_token_is_noop() {
    let manager = create_test_manager();
    let token = manager.sign(&user(), &secret(), &SignOptions::new()).await.unwrap();

    manager.destroy("garbage").await.unwrap();
    manager.destroy_by_jti("").await.unwrap();

    assert_eq!(manager.registry().len().await, 1);
    assert!(manager.is_live(&token).await.unwrap());
}

#[tokio::test]
async fn test_destroy_by_jti() {
    let manager = create_test_manager();
    let token = manager
        .sign(&user(), &secret(), &SignOptions::new().with_jwtid("abc"))
        .await
        .unwrap();

    manager.destroy_by_jti("abc").await.unwrap();

    assert!(!manager.is_live(&token).await.unwrap());
    manager.destroy_by_jti("abc").await.unwrap();
}

#[tokio::test]
async fn test_is_live() {
    let manager = create_test_manager();
    let token = manager.sign(&user(), &secret(), &SignOptions::new()).await.unwrap();

    assert!(manager.is_live(&token).await.unwrap());
    assert!(!manager.is_live("garbage").await.unwrap());

    manager.destroy(&token).await.unwrap();
    assert!(!manager.is_live(&token).await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_registry_governed_token_lapses() {
    let manager = create_test_manager();
    let token = manager
        .sign(&user(), &secret(), &SignOptions::new().with_expires_key_in("10 seconds"))
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(11)).await;

    let err = manager
        .verify(&token, &secret(), &VerifyOptions::new())
        .await
        .unwrap_err();
    assert!(err.is_token_expired());
}

#[tokio::test(start_paused = true)]
async fn test_touch_slides_registry_expiry() {
    let manager = create_test_manager();
    let token = manager
        .sign(&user(), &secret(), &SignOptions::new().with_expires_key_in("10 seconds"))
        .await
        .unwrap();
    let key = manager.key_for(manager.decode(&token).unwrap().jti().unwrap());

    tokio::time::advance(Duration::from_secs(8)).await;
    assert!(manager.touch(&token).await.unwrap());
    assert_eq!(manager.registry().ttl(&key).await, Some(10));

    tokio::time::advance(Duration::from_secs(8)).await;
    assert!(manager.registry().exists(&key).await.unwrap());

    let claims = manager
        .verify(&token, &secret(), &VerifyOptions::new())
        .await
        .unwrap();
    assert_eq!(claims.expk(), Some(10));
}

#[tokio::test(start_paused = true)]
async fn test_touch_never_revives_lapsed_entry() {
    let manager = create_test_manager();
    let token = manager
        .sign(&user(), &secret(), &SignOptions::new().with_expires_key_in("5 seconds"))
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(6)).await;

    assert!(!manager.touch(&token).await.unwrap());
    assert!(!manager.is_live(&token).await.unwrap());
}

#[tokio::test]
async fn test_touch_after_destroy() {
    let manager = create_test_manager();
    let token = manager
        .sign(&user(), &secret(), &SignOptions::new().with_expires_key_in("1 minute"))
        .await
        .unwrap();

    manager.destroy(&token).await.unwrap();

    assert!(!manager.touch(&token).await.unwrap());
    assert!(manager.registry().is_empty().await);
}

#[tokio::test]
async fn test_touch_ignores_signature_governed_token() {
    let manager = create_test_manager();
    let token = manager
        .sign(&user(), &secret(), &SignOptions::new().with_expires_in("1 minute"))
        .await
        .unwrap();
    let key = manager.key_for(manager.decode(&token).unwrap().jti().unwrap());
    let before = manager.registry().ttl(&key).await;

    assert!(!manager.touch(&token).await.unwrap());
    assert_eq!(manager.registry().ttl(&key).await, before);
}

#[tokio::test]
async fn test_touch_ignores_unbounded_token() {
    let manager = create_test_manager();
    let token = manager.sign(&user(), &secret(), &SignOptions::new()).await.unwrap();
    let key = manager.key_for(manager.decode(&token).unwrap().jti().unwrap());

    assert!(!manager.touch(&token).await.unwrap());
    assert!(!manager.touch("garbage").await.unwrap());
    assert_eq!(manager.registry().ttl(&key).await, None);
    assert!(manager.registry().exists(&key).await.unwrap());
}
