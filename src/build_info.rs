//! Build stamp
//!
//! Version and build metadata stamped by `build.rs`, reported by the status
//! tool and the startup banner.

use std::path::Path;

use serde::Serialize;

use crate::costing::SummaryOptions;

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const BUILD_NUMBER: Option<&str> = option_env!("RECIPE_COSTING_BUILD_NUMBER");
const BUILD_TIMESTAMP: Option<&str> = option_env!("RECIPE_COSTING_BUILD_TIMESTAMP");

/// Version plus the build counter and compile time, when the build script ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildStamp {
    pub version: &'static str,
    pub build_number: Option<u64>,
    pub build_timestamp: Option<&'static str>,
}

impl BuildStamp {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            build_number: BUILD_NUMBER.and_then(|s| s.trim().parse().ok()),
            build_timestamp: BUILD_TIMESTAMP,
        }
    }

    /// e.g. `1.0.0 (build 42, 2026-01-01T00:00:00Z)`
    pub fn label(&self) -> String {
        match (self.build_number, self.build_timestamp) {
            (Some(number), Some(timestamp)) => {
                format!("{} (build {}, {})", self.version, number, timestamp)
            }
            (Some(number), None) => format!("{} (build {})", self.version, number),
            (None, _) => self.version.to_string(),
        }
    }
}

/// Banner the server prints to stderr before serving
pub fn startup_banner(catalog_path: &Path, options: &SummaryOptions) -> String {
    format!(
        "Recipe Costing {}\n  catalog: {}\n  missing offers: {}",
        BuildStamp::current().label(),
        catalog_path.display(),
        options.missing_offers.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::MissingOfferPolicy;

    #[test]
    fn test_label_formats() {
        let mut stamp = BuildStamp {
            version: "1.2.3",
            build_number: Some(7),
            build_timestamp: Some("2026-01-01T00:00:00Z"),
        };
        assert_eq!(stamp.label(), "1.2.3 (build 7, 2026-01-01T00:00:00Z)");

        stamp.build_timestamp = None;
        assert_eq!(stamp.label(), "1.2.3 (build 7)");

        stamp.build_number = None;
        assert_eq!(stamp.label(), "1.2.3");
    }

    #[test]
    fn test_banner_names_catalog_and_policy() {
        let options = SummaryOptions {
            missing_offers: MissingOfferPolicy::Fail,
        };
        let banner = startup_banner(Path::new("/tmp/catalog.db"), &options);
        assert!(banner.starts_with("Recipe Costing "));
        assert!(banner.contains(VERSION));
        assert!(banner.contains("catalog: /tmp/catalog.db"));
        assert!(banner.contains("missing offers: fail"));
    }
}
