use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

pub mod docker;
mod error;

pub use error::{Error, Result};

/// The exact length of a full (untruncated) Docker container ID.
const CONTAINER_ID_LEN: usize = 64;

/// A validated, full-length Docker container identifier.
///
/// The cgroup lookup paths are built from the full 64-character hex ID; a
/// truncated or otherwise malformed ID would silently resolve to nothing, so
/// construction rejects anything that is not exactly 64 lowercase hex
/// characters.
///
/// # Examples
///
/// ```
/// # use dmem::container::ContainerID;
/// let raw = "abc123abc123abc123abc123abc123abc123abc123abc123abc123abc123abcd";
/// let id = ContainerID::new(raw).unwrap();
/// assert_eq!(id.as_ref(), raw);
/// assert_eq!(id.short(), "abc123abc123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerID(Arc<str>);

impl ContainerID {
    /// Creates a new `ContainerID` from the given raw id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContainerID`] unless the input is exactly
    /// [`CONTAINER_ID_LEN`] lowercase hex characters.
    pub fn new(src: impl AsRef<str>) -> Result<Self> {
        let src = src.as_ref();
        let valid = src.len() == CONTAINER_ID_LEN
            && src.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if !valid {
            return Err(Error::InvalidContainerID(src.to_owned()));
        }

        Ok(Self(src.into()))
    }

    /// The first 12 characters, the way `docker ps` abbreviates IDs.
    ///
    /// For display only; cgroup lookups always use the full ID.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl AsRef<str> for ContainerID {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ContainerID {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A running container as reported by the container lister.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRef {
    pub id: ContainerID,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_ID: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn test_valid_container_id() {
        let id = ContainerID::new(VALID_ID).unwrap();
        assert_eq!(id.as_ref(), VALID_ID);
        assert_eq!(id.to_string(), VALID_ID);
    }

    #[test]
    fn test_truncated_container_id_rejected() {
        let err = ContainerID::new(&VALID_ID[..12]).unwrap_err();
        assert!(matches!(err, Error::InvalidContainerID(_)));
    }

    #[test]
    fn test_non_hex_container_id_rejected() {
        let raw = format!("{}xyz", &VALID_ID[..61]);
        assert!(ContainerID::new(raw).is_err());
        let raw = VALID_ID.to_uppercase();
        assert!(ContainerID::new(raw).is_err());
    }

    #[test]
    fn test_short_id() {
        let id = ContainerID::new(VALID_ID).unwrap();
        assert_eq!(id.short(), "0123456789ab");
    }
}
