use std::collections::HashSet;

/// Availability probe for backend packages.
///
/// The probe must be side-effect-free, must never load the package it is
/// asked about, and must never error: a failed probe reads as unavailable.
/// Safe to call speculatively for many variants.
pub trait PackageOracle: Send + Sync {
    fn has_package(&self, name: &str) -> bool;
}

/// Oracle backed by an explicit set of package names.
#[derive(Debug, Clone, Default)]
pub struct StaticPackageOracle {
    packages: HashSet<String>,
}

impl StaticPackageOracle {
    pub fn new<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            packages: packages.into_iter().map(Into::into).collect(),
        }
    }
}

impl PackageOracle for StaticPackageOracle {
    fn has_package(&self, name: &str) -> bool {
        self.packages.contains(name)
    }
}
