//! User construct: validation, default resolution, and rendering.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Value};
use tracing::{debug, info};

use skystack_core::{
    AccessGrants, Environment, GrantResult, LazyName, NameRequest, NamingContext,
    ProvisioningEngine, ResourceKind, SecretValue,
};

use crate::auth::{render_authentication_mode, AuthenticationType};
use crate::error::{CacheError, CacheResult};

/// Fully-restrictive access string applied when the caller supplies none.
pub const DEFAULT_ACCESS_STRING: &str = "off -@all";

/// Fixed action token issued by [`Principal::grant_connect`].
pub const CONNECT_ACTION: &str = "cache:Connect";

/// Service segment used for deterministic user ARNs.
const SERVICE: &str = "cache";

/// Fixed resource-type segment in user ARNs.
const USER_RESOURCE_TYPE: &str = "user";

const MAX_USER_NAME_LENGTH: usize = 40;

const MAX_PASSWORDS: usize = 2;

/// Starts with a letter, hyphen-separated alphanumeric runs, no leading or
/// trailing hyphen, no consecutive hyphens.
const USER_NAME_PATTERN: &str = "^[A-Za-z][A-Za-z0-9]*(-[A-Za-z0-9]+)*$";

fn user_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(USER_NAME_PATTERN).expect("user name pattern is valid"))
}

/// Input properties for a user construct.
#[derive(Debug, Clone)]
pub struct UserProps {
    user_name: Option<String>,
    access_string: Option<String>,
    authentication_type: AuthenticationType,
    passwords: Vec<SecretValue>,
}

impl UserProps {
    pub fn new(authentication_type: AuthenticationType) -> Self {
        Self {
            user_name: None,
            access_string: None,
            authentication_type,
            passwords: Vec::new(),
        }
    }

    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn with_access_string(mut self, access_string: impl Into<String>) -> Self {
        self.access_string = Some(access_string.into());
        self
    }

    pub fn with_password(mut self, password: SecretValue) -> Self {
        self.passwords.push(password);
        self
    }
}

/// Validate an explicit user name.
///
/// Absent or deferred names are not checked here; a deferred name is derived
/// by the naming context and satisfies the pattern by construction.
pub fn validate_user_name(user_name: Option<&str>) -> CacheResult<()> {
    let Some(name) = user_name else {
        return Ok(());
    };

    let length = name.chars().count();
    if length == 0 || length > MAX_USER_NAME_LENGTH {
        return Err(CacheError::InvalidUserName {
            name: name.to_string(),
            reason: format!(
                "length must be between 1 and {} characters, got {}",
                MAX_USER_NAME_LENGTH, length
            ),
        });
    }

    if !user_name_regex().is_match(name) {
        return Err(CacheError::InvalidUserName {
            name: name.to_string(),
            reason: "must start with a letter and contain only alphanumerics and \
                     single non-leading, non-trailing hyphens"
                .to_string(),
        });
    }

    Ok(())
}

/// Validate that the authentication type and credential list agree.
pub fn validate_authentication(
    authentication_type: AuthenticationType,
    passwords: &[SecretValue],
) -> CacheResult<()> {
    match authentication_type {
        AuthenticationType::Password if passwords.is_empty() => {
            Err(CacheError::InvalidAuthentication(
                "password authentication requires at least one password".to_string(),
            ))
        }
        AuthenticationType::Password if passwords.len() > MAX_PASSWORDS => {
            Err(CacheError::InvalidAuthentication(format!(
                "password authentication accepts at most {} passwords, got {}",
                MAX_PASSWORDS,
                passwords.len()
            )))
        }
        AuthenticationType::Iam if !passwords.is_empty() => {
            Err(CacheError::InvalidAuthentication(format!(
                "iam authentication does not accept passwords, got {}",
                passwords.len()
            )))
        }
        _ => Ok(()),
    }
}

/// A validated user configuration with defaults resolved.
///
/// Immutable once built. Rendering is a pure function of the configuration
/// and the naming context, so repeated renders are byte-identical.
#[derive(Debug, Clone)]
pub struct UserConfiguration {
    user_name: LazyName,
    access_string: String,
    authentication_type: AuthenticationType,
    passwords: Vec<SecretValue>,
}

impl UserConfiguration {
    /// Validate the input and resolve defaults. Fails fast: no engine call
    /// has been made by the time an error surfaces.
    pub fn build(props: UserProps) -> CacheResult<Self> {
        validate_user_name(props.user_name.as_deref())?;
        validate_authentication(props.authentication_type, &props.passwords)?;

        let user_name = match props.user_name {
            Some(name) => LazyName::Resolved(name),
            None => LazyName::Deferred(NameRequest::new(MAX_USER_NAME_LENGTH, '-')),
        };
        let access_string = props
            .access_string
            .unwrap_or_else(|| DEFAULT_ACCESS_STRING.to_string());

        Ok(Self {
            user_name,
            access_string,
            authentication_type: props.authentication_type,
            passwords: props.passwords,
        })
    }

    /// Render the flat property bag submitted to the provisioning engine.
    pub fn render(&self, ctx: &NamingContext) -> Value {
        let user_name = self.user_name.resolve(ctx);
        debug!("Rendering user '{}'", user_name);
        json!({
            "userName": user_name,
            "accessString": self.access_string,
            "authenticationMode":
                render_authentication_mode(self.authentication_type, &self.passwords),
        })
    }
}

/// A principal permitted to authenticate against the database.
pub trait Principal {
    fn user_name(&self) -> &str;
    fn user_arn(&self) -> &str;

    /// Issue a grant for the given actions on the given resources.
    fn grant(
        &self,
        grants: &dyn AccessGrants,
        actions: &[&str],
        resource_arns: &[&str],
    ) -> anyhow::Result<GrantResult> {
        grants.grant(self.user_arn(), actions, resource_arns)
    }

    /// Issue the single fixed connect grant on this principal.
    fn grant_connect(&self, grants: &dyn AccessGrants) -> anyhow::Result<GrantResult> {
        self.grant(grants, &[CONNECT_ACTION], &[self.user_arn()])
    }
}

/// A provisioned or imported database user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    user_name: String,
    user_arn: String,
}

impl User {
    /// Build, render, and submit a user in one pass.
    ///
    /// Exactly one create call is issued, and only after every validation
    /// has passed; there is no observable partial construction.
    pub fn new(
        engine: &dyn ProvisioningEngine,
        ctx: &NamingContext,
        props: UserProps,
    ) -> CacheResult<Self> {
        let configuration = UserConfiguration::build(props)?;
        let properties = configuration.render(ctx);
        let handle = engine.create_resource(ResourceKind::User, properties)?;
        info!("Created user '{}' ({})", handle.name, handle.arn);

        Ok(Self {
            user_name: handle.name,
            user_arn: handle.arn,
        })
    }

    /// Import an existing user from a bare name, without provisioning.
    ///
    /// The ARN is derived deterministically from the fixed `user`
    /// resource-type segment.
    pub fn from_attributes(env: &Environment, user_name: impl Into<String>) -> Self {
        let user_name = user_name.into();
        let user_arn = env.format_arn(SERVICE, USER_RESOURCE_TYPE, &user_name);
        Self {
            user_name,
            user_arn,
        }
    }
}

impl Principal for User {
    fn user_name(&self) -> &str {
        &self.user_name
    }

    fn user_arn(&self) -> &str {
        &self.user_arn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_accepts_valid_names() {
        for name in ["a", "alice", "alice-1", "A1-b2-c3", "Z"] {
            assert!(validate_user_name(Some(name)).is_ok(), "{name} should pass");
        }
    }

    #[test]
    fn test_validate_name_rejects_bad_lengths() {
        assert!(validate_user_name(Some("")).is_err());
        let long = "a".repeat(41);
        assert!(validate_user_name(Some(&long)).is_err());
        let max = "a".repeat(40);
        assert!(validate_user_name(Some(&max)).is_ok());
    }

    #[test]
    fn test_validate_name_rejects_bad_patterns() {
        for name in ["1abc", "-abc", "abc-", "ab--cd", "ab_cd", "ab cd", "ab.cd"] {
            assert!(validate_user_name(Some(name)).is_err(), "{name} should fail");
        }
    }

    #[test]
    fn test_validate_name_skips_absent_names() {
        assert!(validate_user_name(None).is_ok());
    }

    #[test]
    fn test_validate_authentication_combinations() {
        let one = vec![SecretValue::new("a")];
        let two = vec![SecretValue::new("a"), SecretValue::new("b")];

        let three = vec![
            SecretValue::new("a"),
            SecretValue::new("b"),
            SecretValue::new("c"),
        ];

        assert!(validate_authentication(AuthenticationType::Password, &[]).is_err());
        assert!(validate_authentication(AuthenticationType::Password, &one).is_ok());
        assert!(validate_authentication(AuthenticationType::Password, &two).is_ok());
        assert!(validate_authentication(AuthenticationType::Password, &three).is_err());
        assert!(validate_authentication(AuthenticationType::Iam, &[]).is_ok());
        assert!(validate_authentication(AuthenticationType::Iam, &one).is_err());
    }

    #[test]
    fn test_deferred_name_resolution_at_render() {
        let ctx = NamingContext::new(["Prod", "CacheStack"], "AppUser");
        let configuration =
            UserConfiguration::build(UserProps::new(AuthenticationType::Iam)).unwrap();
        let bag = configuration.render(&ctx);
        assert_eq!(bag["userName"], "prod-cachestack-appuser");
    }

    #[test]
    fn test_default_access_string() {
        let ctx = NamingContext::new(["S"], "U");
        let configuration =
            UserConfiguration::build(UserProps::new(AuthenticationType::Iam)).unwrap();
        assert_eq!(configuration.render(&ctx)["accessString"], "off -@all");
    }

    #[test]
    fn test_render_is_idempotent() {
        let ctx = NamingContext::new(["Prod"], "User");
        let configuration = UserConfiguration::build(
            UserProps::new(AuthenticationType::Password)
                .with_password(SecretValue::new("secretA")),
        )
        .unwrap();

        let first = configuration.render(&ctx);
        let second = configuration.render(&ctx);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_from_attributes_derives_arn() {
        let env = Environment::new("aws", "eu-west-1", "123456789012");
        let user = User::from_attributes(&env, "bob");
        assert_eq!(user.user_name(), "bob");
        assert_eq!(
            user.user_arn(),
            "arn:aws:cache:eu-west-1:123456789012:user:bob"
        );
    }
}
