//! Integration tests for the user construct.

use serde_json::json;

use skystack_cache::{AuthenticationType, CacheError, Principal, User, UserProps};
use skystack_core::{Environment, NamingContext, RecordingEngine, ResourceKind, SecretValue};

fn ctx() -> NamingContext {
    NamingContext::new(["Prod", "CacheStack"], "AppUser")
}

#[test]
fn test_iam_user_round_trip() {
    let engine = RecordingEngine::new();

    let user = User::new(
        &engine,
        &ctx(),
        UserProps::new(AuthenticationType::Iam)
            .with_user_name("alice-1")
            .with_access_string("on ~* +@all"),
    )
    .unwrap();

    assert_eq!(user.user_name(), "alice-1");

    let creates = engine.creates_of(ResourceKind::User);
    assert_eq!(creates.len(), 1);
    assert_eq!(
        creates[0].properties,
        json!({
            "userName": "alice-1",
            "accessString": "on ~* +@all",
            "authenticationMode": { "Type": "iam" },
        })
    );
}

#[test]
fn test_password_user_renders_unwrapped_secret() {
    let engine = RecordingEngine::new();

    User::new(
        &engine,
        &ctx(),
        UserProps::new(AuthenticationType::Password)
            .with_user_name("alice-1")
            .with_password(SecretValue::new("secretA")),
    )
    .unwrap();

    let creates = engine.creates_of(ResourceKind::User);
    assert_eq!(
        creates[0].properties["authenticationMode"],
        json!({ "Type": "password", "Passwords": ["secretA"] })
    );
}

#[test]
fn test_validation_fails_before_any_engine_call() {
    let engine = RecordingEngine::new();

    let err = User::new(
        &engine,
        &ctx(),
        UserProps::new(AuthenticationType::Password).with_user_name("alice-1"),
    )
    .unwrap_err();

    assert!(matches!(err, CacheError::InvalidAuthentication(_)));
    assert!(engine.creates().is_empty());
}

#[test]
fn test_more_than_two_passwords_is_rejected() {
    let engine = RecordingEngine::new();

    let err = User::new(
        &engine,
        &ctx(),
        UserProps::new(AuthenticationType::Password)
            .with_user_name("alice-1")
            .with_password(SecretValue::new("a"))
            .with_password(SecretValue::new("b"))
            .with_password(SecretValue::new("c")),
    )
    .unwrap_err();

    assert!(matches!(err, CacheError::InvalidAuthentication(_)));
    assert!(err.to_string().contains("at most 2"));
    assert!(engine.creates().is_empty());
}

#[test]
fn test_invalid_name_cites_offending_value() {
    let engine = RecordingEngine::new();

    let err = User::new(
        &engine,
        &ctx(),
        UserProps::new(AuthenticationType::Iam).with_user_name("ab--cd"),
    )
    .unwrap_err();

    assert!(err.to_string().contains("ab--cd"));
    assert!(engine.creates().is_empty());
}

#[test]
fn test_auto_generated_name_comes_from_context() {
    let engine = RecordingEngine::new();

    let user = User::new(&engine, &ctx(), UserProps::new(AuthenticationType::Iam)).unwrap();

    assert_eq!(user.user_name(), "prod-cachestack-appuser");
    let creates = engine.creates_of(ResourceKind::User);
    assert_eq!(creates[0].properties["accessString"], "off -@all");
}

#[test]
fn test_engine_errors_propagate_unchanged() {
    let engine = RecordingEngine::new().fail_with("naming conflict");

    let err = User::new(
        &engine,
        &ctx(),
        UserProps::new(AuthenticationType::Iam).with_user_name("alice"),
    )
    .unwrap_err();

    assert!(matches!(err, CacheError::Engine(_)));
    assert!(err.to_string().contains("naming conflict"));
}

#[test]
fn test_imported_user_grant_connect() {
    let engine = RecordingEngine::new();
    let env = Environment::new("aws", "eu-west-1", "123456789012");

    let user = User::from_attributes(&env, "bob");
    let result = user.grant_connect(&engine).unwrap();

    assert_eq!(result.actions, vec!["cache:Connect"]);
    assert_eq!(
        result.principal_arn,
        "arn:aws:cache:eu-west-1:123456789012:user:bob"
    );
    // Importing provisions nothing.
    assert!(engine.creates().is_empty());
    assert_eq!(engine.grants().len(), 1);
}

#[test]
fn test_grant_passes_actions_and_resources() {
    let engine = RecordingEngine::new();
    let env = Environment::new("aws", "eu-west-1", "123456789012");

    let user = User::from_attributes(&env, "bob");
    user.grant(&engine, &["cache:Connect", "cache:Describe"], &["arn:x"])
        .unwrap();

    let grants = engine.grants();
    assert_eq!(grants[0].actions, vec!["cache:Connect", "cache:Describe"]);
    assert_eq!(grants[0].resource_arns, vec!["arn:x"]);
}
