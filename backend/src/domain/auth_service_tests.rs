//! Tests for the account service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    MockAccountRepository, MockClassRepository, MockPasswordHasher, MockTokenIssuer,
    MockUserRepository, TokenError,
};
use crate::domain::test_fixtures::{class, lecturer_profile, password, student, student_profile};
use crate::domain::{AccessToken, ErrorCode, PasswordHash, StoredCredentials, UserId};

type Service = AuthService<
    MockAccountRepository,
    MockUserRepository,
    MockClassRepository,
    MockPasswordHasher,
    MockTokenIssuer,
>;

struct Mocks {
    accounts: MockAccountRepository,
    users: MockUserRepository,
    classes: MockClassRepository,
    hasher: MockPasswordHasher,
    tokens: MockTokenIssuer,
}

impl Mocks {
    fn new() -> Self {
        Self {
            accounts: MockAccountRepository::new(),
            users: MockUserRepository::new(),
            classes: MockClassRepository::new(),
            hasher: MockPasswordHasher::new(),
            tokens: MockTokenIssuer::new(),
        }
    }

    fn into_service(self) -> Service {
        AuthService::new(
            Arc::new(self.accounts),
            Arc::new(self.users),
            Arc::new(self.classes),
            Arc::new(self.hasher),
            Arc::new(self.tokens),
        )
    }
}

fn student_registration() -> Registration {
    Registration {
        profile: student_profile("siti@campus.ac.id", "2107411001", 1),
        password: password("secret123"),
    }
}

fn stored(user_id: i64) -> StoredCredentials {
    StoredCredentials {
        user: student(user_id, "siti@campus.ac.id", "2107411001"),
        password_hash: PasswordHash::new("$argon2id$stub"),
    }
}

#[tokio::test]
async fn register_student_hashes_and_creates() {
    let mut mocks = Mocks::new();
    mocks
        .classes
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(class(1, "TI-3A"))));
    mocks
        .users
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    mocks
        .users
        .expect_find_by_npm()
        .times(1)
        .return_once(|_| Ok(None));
    mocks
        .hasher
        .expect_hash()
        .times(1)
        .return_once(|_| Ok(PasswordHash::new("$argon2id$stub")));
    mocks
        .accounts
        .expect_create()
        .withf(|account| account.password_hash.as_str() == "$argon2id$stub")
        .times(1)
        .return_once(|account| Ok(User::from_profile(UserId::new(7), account.profile.clone())));

    let user = mocks
        .into_service()
        .register(student_registration())
        .await
        .expect("registration succeeds");

    assert_eq!(user.id, UserId::new(7));
    assert_eq!(user.email.as_str(), "siti@campus.ac.id");
}

#[tokio::test]
async fn register_rejects_taken_email_before_writing() {
    let mut mocks = Mocks::new();
    mocks
        .classes
        .expect_find_by_id()
        .return_once(|_| Ok(Some(class(1, "TI-3A"))));
    mocks
        .users
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(student(3, "siti@campus.ac.id", "999"))));
    mocks.hasher.expect_hash().never();
    mocks.accounts.expect_create().never();

    let err = mocks
        .into_service()
        .register(student_registration())
        .await
        .expect_err("duplicate email");

    assert_eq!(err.code(), ErrorCode::AlreadyUse);
    assert_eq!(err.details(), Some(&json!({ "field": "email" })));
}

#[tokio::test]
async fn register_rejects_taken_npm() {
    let mut mocks = Mocks::new();
    mocks
        .classes
        .expect_find_by_id()
        .return_once(|_| Ok(Some(class(1, "TI-3A"))));
    mocks.users.expect_find_by_email().return_once(|_| Ok(None));
    mocks
        .users
        .expect_find_by_npm()
        .return_once(|_| Ok(Some(student(4, "other@campus.ac.id", "2107411001"))));
    mocks.accounts.expect_create().never();

    let err = mocks
        .into_service()
        .register(student_registration())
        .await
        .expect_err("duplicate npm");

    assert_eq!(err.code(), ErrorCode::AlreadyUse);
    assert_eq!(err.details(), Some(&json!({ "field": "npm" })));
}

#[tokio::test]
async fn register_requires_existing_class() {
    let mut mocks = Mocks::new();
    mocks
        .classes
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));
    mocks.users.expect_find_by_email().never();
    mocks.accounts.expect_create().never();

    let err = mocks
        .into_service()
        .register(student_registration())
        .await
        .expect_err("missing class");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn register_lecturer_skips_class_and_npm_checks() {
    let mut mocks = Mocks::new();
    mocks.classes.expect_find_by_id().never();
    mocks.users.expect_find_by_npm().never();
    mocks.users.expect_find_by_email().return_once(|_| Ok(None));
    mocks
        .hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::new("$argon2id$stub")));
    mocks
        .accounts
        .expect_create()
        .times(1)
        .return_once(|account| Ok(User::from_profile(UserId::new(9), account.profile.clone())));

    let registration = Registration {
        profile: lecturer_profile("dosen@campus.ac.id"),
        password: password("secret123"),
    };
    let user = mocks
        .into_service()
        .register(registration)
        .await
        .expect("lecturer registration");

    assert_eq!(user.id, UserId::new(9));
}

#[tokio::test]
async fn register_surfaces_storage_race_as_already_use() {
    let mut mocks = Mocks::new();
    mocks
        .classes
        .expect_find_by_id()
        .return_once(|_| Ok(Some(class(1, "TI-3A"))));
    mocks.users.expect_find_by_email().return_once(|_| Ok(None));
    mocks.users.expect_find_by_npm().return_once(|_| Ok(None));
    mocks
        .hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::new("$argon2id$stub")));
    mocks.accounts.expect_create().return_once(|_| {
        Err(crate::domain::ports::AccountRepositoryError::duplicate(
            "users_email_key",
        ))
    });

    let err = mocks
        .into_service()
        .register(student_registration())
        .await
        .expect_err("constraint backstop");

    assert_eq!(err.code(), ErrorCode::AlreadyUse);
}

#[tokio::test]
async fn login_issues_token_for_matching_password() {
    let mut mocks = Mocks::new();
    mocks
        .accounts
        .expect_find_credentials()
        .times(1)
        .return_once(|_| Ok(Some(stored(5))));
    mocks.hasher.expect_verify().times(1).return_const(true);
    mocks
        .tokens
        .expect_issue()
        .times(1)
        .return_once(|_| Ok(AccessToken::new("signed.jwt.token")));

    let credentials =
        LoginCredentials::try_from_parts("siti@campus.ac.id", "secret123").expect("credentials");
    let session = mocks
        .into_service()
        .login(credentials)
        .await
        .expect("login succeeds");

    assert_eq!(session.token.as_str(), "signed.jwt.token");
    assert_eq!(session.user.id, UserId::new(5));
}

#[tokio::test]
async fn login_hides_whether_the_email_exists() {
    let mut unknown = Mocks::new();
    unknown
        .accounts
        .expect_find_credentials()
        .return_once(|_| Ok(None));
    let mut wrong = Mocks::new();
    wrong
        .accounts
        .expect_find_credentials()
        .return_once(|_| Ok(Some(stored(5))));
    wrong.hasher.expect_verify().return_const(false);
    wrong.tokens.expect_issue().never();

    let credentials =
        || LoginCredentials::try_from_parts("siti@campus.ac.id", "secret123").expect("credentials");
    let unknown_err = unknown
        .into_service()
        .login(credentials())
        .await
        .expect_err("unknown email");
    let wrong_err = wrong
        .into_service()
        .login(credentials())
        .await
        .expect_err("wrong password");

    assert_eq!(unknown_err.code(), ErrorCode::BadRequestField);
    assert_eq!(unknown_err.message(), wrong_err.message());
}

#[tokio::test]
async fn login_maps_signing_failure_to_internal() {
    let mut mocks = Mocks::new();
    mocks
        .accounts
        .expect_find_credentials()
        .return_once(|_| Ok(Some(stored(5))));
    mocks.hasher.expect_verify().return_const(true);
    mocks
        .tokens
        .expect_issue()
        .return_once(|_| Err(TokenError::signing("bad key")));

    let credentials =
        LoginCredentials::try_from_parts("siti@campus.ac.id", "secret123").expect("credentials");
    let err = mocks
        .into_service()
        .login(credentials)
        .await
        .expect_err("signing failure");

    assert_eq!(err.code(), ErrorCode::InternalServer);
}
