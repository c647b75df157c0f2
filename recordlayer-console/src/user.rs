//! The `User` schema loaded by the console.

use recordlayer::prelude::*;
use serde::Serialize;

/// One user record from the input file.
#[derive(Debug, Clone, PartialEq, Serialize, Record)]
#[record(name = "users")]
pub struct User {
    #[record(index)]
    username: String,
    firstname: String,
    lastname: String,
    #[record(index)]
    num: u32,
    #[record(index)]
    email: String,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        num: u32,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            firstname: firstname.into(),
            lastname: lastname.into(),
            num,
            email: email.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    pub fn num(&self) -> u32 {
        self.num
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Builds the store with the console's admission rules.
///
/// - the `admin` username is reserved,
/// - `.tv` addresses are refused,
/// - at most one username may contain `chris`.
pub fn user_store(capacity: usize) -> RecordStore<User> {
    RecordStore::builder()
        .capacity(capacity)
        .require(|user: &User| user.username != "admin", "Protect admin username")
        .require(|user: &User| !user.email.contains(".tv"), "Do not allow any .tv emails")
        .require_unique(|user: &User| user.username.contains("chris"), "")
        .build()
}
