use serde::{Deserialize, Serialize};

use super::{
    ActivityData, AnalysisMode, BroadcastReceiverData, CertificateData, ContentProviderData,
    FeatureData, FileData, GeneralData, ResourceData, ServiceData,
};

/// Permissions declared by the package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PermissionData {
    /// `<permission>` entries defined by the package
    pub defines_permissions: Vec<String>,
    /// `<uses-permission>` entries
    pub uses_permissions: Vec<String>,
}

/// Classes found in the dex files, split on whether they live under the
/// package name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassPathData {
    pub package_classes: Vec<String>,
    pub other_classes: Vec<String>,
}

impl ClassPathData {
    /// Split class names into package classes and everything else
    pub fn from_classes<I, S>(package_name: &str, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefix = format!("{}.", package_name);
        let mut data = Self::default();
        for class in classes {
            let class = class.into();
            if class.starts_with(&prefix) {
                data.package_classes.push(class);
            } else {
                data.other_classes.push(class);
            }
        }
        data
    }
}

/// Full analysis result for a single package.
///
/// The component type parameters exist so any [super::Component] can be
/// fingerprinted, everything else uses the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDetailData<
    A = ActivityData,
    S = ServiceData,
    P = ContentProviderData,
    R = BroadcastReceiverData,
    F = FeatureData,
> {
    pub analysis_mode: AnalysisMode,
    pub general_data: GeneralData,
    pub certificate_data: CertificateData,
    #[serde(default = "Vec::new")]
    pub activity_data: Vec<A>,
    #[serde(default = "Vec::new")]
    pub service_data: Vec<S>,
    #[serde(default = "Vec::new")]
    pub content_provider_data: Vec<P>,
    #[serde(default = "Vec::new")]
    pub broadcast_receiver_data: Vec<R>,
    pub permission_data: PermissionData,
    #[serde(default = "Vec::new")]
    pub feature_data: Vec<F>,
    pub file_data: FileData,
    pub resource_data: ResourceData,
    pub class_path_data: ClassPathData,
}

impl<A, S, P, R, F> AppDetailData<A, S, P, R, F> {
    /// Create an analysis result with no components and empty statistics
    pub fn new(analysis_mode: AnalysisMode, general_data: GeneralData) -> Self {
        Self {
            analysis_mode,
            general_data,
            certificate_data: CertificateData::default(),
            activity_data: Vec::new(),
            service_data: Vec::new(),
            content_provider_data: Vec::new(),
            broadcast_receiver_data: Vec::new(),
            permission_data: PermissionData::default(),
            feature_data: Vec::new(),
            file_data: FileData::default(),
            resource_data: ResourceData::default(),
            class_path_data: ClassPathData::default(),
        }
    }

    pub fn package_name(&self) -> &str {
        &self.general_data.package_name
    }
}
