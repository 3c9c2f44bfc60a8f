//! Natural key of a published binary artifact.

use bintrail_backend::BinaryDescriptor;
use bintrail_db::models::BinaryRelease;

/// The identity of one artifact slot within a repository.
///
/// Two records (or a record and a descriptor) refer to the same slot when
/// all six fields match exactly; any field may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ReleaseIdentity {
    pub name: Option<String>,
    pub version: Option<String>,
    pub release: Option<String>,
    pub epoch: Option<String>,
    pub arch: Option<String>,
    pub medium: Option<String>,
}

impl ReleaseIdentity {
    pub fn of_descriptor(descriptor: &BinaryDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            version: descriptor.version.clone(),
            release: descriptor.release.clone(),
            epoch: descriptor.epoch.clone(),
            arch: descriptor.arch.clone(),
            medium: descriptor.medium.clone(),
        }
    }

    pub fn of_record(record: &BinaryRelease) -> Self {
        Self {
            name: record.name.clone(),
            version: record.version.clone(),
            release: record.release.clone(),
            epoch: record.epoch.clone(),
            arch: record.arch.clone(),
            medium: record.medium.clone(),
        }
    }
}

impl std::fmt::Display for ReleaseIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unset = "-";
        write!(
            f,
            "{}-{}-{}.{} ({}, epoch {})",
            self.name.as_deref().unwrap_or(unset),
            self.version.as_deref().unwrap_or(unset),
            self.release.as_deref().unwrap_or(unset),
            self.arch.as_deref().unwrap_or(unset),
            self.medium.as_deref().unwrap_or("no medium"),
            self.epoch.as_deref().unwrap_or(unset),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_equality() {
        let descriptor = BinaryDescriptor {
            name: Some("curl".into()),
            version: Some("8.5.0".into()),
            release: Some("1.2".into()),
            arch: Some("x86_64".into()),
            ..Default::default()
        };

        let a = ReleaseIdentity::of_descriptor(&descriptor);
        let b = ReleaseIdentity::of_descriptor(&descriptor);
        assert_eq!(a, b);

        let mut other = descriptor.clone();
        other.medium = Some("dvd5".into());
        assert_ne!(a, ReleaseIdentity::of_descriptor(&other));
    }

    #[test]
    fn test_identity_display() {
        let identity = ReleaseIdentity {
            name: Some("curl".into()),
            version: Some("8.5.0".into()),
            release: Some("1.2".into()),
            arch: Some("x86_64".into()),
            ..Default::default()
        };
        assert_eq!(identity.to_string(), "curl-8.5.0-1.2.x86_64 (no medium, epoch -)");
    }
}
