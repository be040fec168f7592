use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// How the analyzed package was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisMode {
    /// Package installed on the device, read through the package manager
    InstalledPackage,
    /// Standalone APK file that isn't installed
    ApkFile,
}

impl Display for AnalysisMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::InstalledPackage => "installed package",
                Self::ApkFile => "apk file",
            }
        )
    }
}

/// Where an installed package came from, as reported by its installer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppSource {
    GooglePlay,
    AmazonStore,
    SystemPreinstalled,
    #[default]
    Unknown,
}

impl AppSource {
    /// Classify an installer package name
    pub fn from_installer(installer: Option<&str>, is_system_app: bool) -> Self {
        match installer {
            Some("com.android.vending") | Some("com.google.android.feedback") => {
                Self::GooglePlay
            }
            Some("com.amazon.venezia") => Self::AmazonStore,
            _ if is_system_app => Self::SystemPreinstalled,
            _ => Self::Unknown,
        }
    }
}

impl Display for AppSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::GooglePlay => "Google Play",
                Self::AmazonStore => "Amazon Appstore",
                Self::SystemPreinstalled => "System preinstalled",
                Self::Unknown => "Unknown",
            }
        )
    }
}

/// Identity of the analyzed package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralData {
    pub package_name: String,
    pub application_name: Option<String>,
    pub version_name: Option<String>,
    pub version_code: i32,
    #[serde(default)]
    pub source: AppSource,
    /// Size of the APK in bytes
    pub apk_size: i64,
    pub min_sdk_version: i32,
    pub target_sdk_version: i32,

    pub description: Option<String>,
    pub apk_directory: Option<String>,
    pub data_directory: Option<String>,
    pub install_location: Option<String>,
    /// Epoch millis
    pub first_install_time: Option<i64>,
    /// Epoch millis
    pub last_update_time: Option<i64>,
    pub uid: Option<i32>,
}

impl GeneralData {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            application_name: None,
            version_name: None,
            version_code: 0,
            source: AppSource::Unknown,
            apk_size: 0,
            min_sdk_version: 0,
            target_sdk_version: 0,
            description: None,
            apk_directory: None,
            data_directory: None,
            install_location: None,
            first_install_time: None,
            last_update_time: None,
            uid: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(Some("com.android.vending"), false, AppSource::GooglePlay)]
    #[case(Some("com.amazon.venezia"), false, AppSource::AmazonStore)]
    #[case(Some("org.fdroid.fdroid"), true, AppSource::SystemPreinstalled)]
    #[case(Some("org.fdroid.fdroid"), false, AppSource::Unknown)]
    #[case(None, true, AppSource::SystemPreinstalled)]
    #[case(None, false, AppSource::Unknown)]
    fn test_source_from_installer(
        #[case] installer: Option<&str>,
        #[case] system: bool,
        #[case] expected: AppSource,
    ) {
        assert_eq!(AppSource::from_installer(installer, system), expected);
    }

    #[test]
    fn test_wire_names() {
        let mode = serde_json::to_string(&AnalysisMode::InstalledPackage).unwrap();
        assert_eq!(mode, "\"INSTALLED_PACKAGE\"");
        let src: AppSource = serde_json::from_str("\"SYSTEM_PREINSTALLED\"").unwrap();
        assert_eq!(src, AppSource::SystemPreinstalled);
    }

    #[test]
    fn test_general_data_optional_fields() {
        let raw = r#"{
            "packageName": "com.example",
            "versionCode": 3,
            "apkSize": 1024,
            "minSdkVersion": 21,
            "targetSdkVersion": 33
        }"#;
        let general: GeneralData = serde_json::from_str(raw).unwrap();
        assert_eq!(general.package_name, "com.example");
        assert_eq!(general.source, AppSource::Unknown);
        assert!(general.version_name.is_none());
        assert_eq!(general.apk_size, 1024);
    }
}
