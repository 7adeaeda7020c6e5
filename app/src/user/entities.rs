use sha2::Digest;

/// The username string used as the primary key for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(pub String);

/// Which partition of the users document an account lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Regular,
    Admin,
}

#[derive(Debug)]
pub struct User {
    pub username: Username,
    pub role: Role,
}

const SALT_BYTES: usize = 16;

/// A salted hash of a user password.
///
/// The stored form is `"<salt>$<digest>"`, both hex-encoded, where the digest
/// is SHA256 over the salt bytes followed by the password. The salt is
/// regenerated for every hash, so two users with the same password store
/// different values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn generate(password: &str) -> Self {
        let salt: [u8; SALT_BYTES] = rand::random();
        Self(Self::encode(&salt, password))
    }

    /// Returns true if the password matches this hash. Values that don't
    /// parse as a salted hash never match.
    pub fn verify(&self, password: &str) -> bool {
        match self.0.split_once('$') {
            Some((salt, _)) => match hex::decode(salt) {
                Ok(salt) => self.0 == Self::encode(&salt, password),
                Err(_) => false,
            },
            None => false,
        }
    }

    pub(crate) fn from_stored(stored: &str) -> Self {
        Self(stored.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn encode(salt: &[u8], password: &str) -> String {
        let mut hasher = sha2::Sha256::new();
        hasher.update(salt);
        hasher.update(password);
        let sha = hasher.finalize();
        format!("{}${}", hex::encode(salt), hex::encode(sha))
    }
}
