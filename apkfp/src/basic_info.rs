use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use crate::hash::{HashAccumulator, StableHash};

/// Partitions holding preinstalled packages
const SYSTEM_PARTITIONS: &[&str] = &[
    "/system/",
    "/system_ext/",
    "/product/",
    "/vendor/",
    "/odm/",
    "/apex/",
];

/// Key of an icon held by an [IconCache].
///
/// The handle never owns image data, whoever renders the icon looks it up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconHandle(String);

impl IconHandle {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Handle for a drawable resource of a package
    pub fn for_resource(package_name: &str, resource_id: u32) -> Self {
        Self(format!("{}/0x{:08x}", package_name, resource_id))
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

impl StableHash for IconHandle {
    fn stable_hash(&self) -> i32 {
        self.0.stable_hash()
    }
}

impl Display for IconHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owner of icon images
pub trait IconCache {
    type Image;

    fn icon(&self, handle: &IconHandle) -> Option<&Self::Image>;
}

impl<T> IconCache for HashMap<IconHandle, T> {
    type Image = T;

    fn icon(&self, handle: &IconHandle) -> Option<&T> {
        self.get(handle)
    }
}

/// Summary of an installed package used for listings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppBasicInfo {
    package_name: String,
    application_name: String,
    icon: Option<IconHandle>,
    path_to_apk: String,
    is_system_app: bool,
}

impl AppBasicInfo {
    pub fn new(
        package_name: impl Into<String>,
        application_name: impl Into<String>,
        path_to_apk: impl Into<String>,
        is_system_app: bool,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            application_name: application_name.into(),
            icon: None,
            path_to_apk: path_to_apk.into(),
            is_system_app,
        }
    }

    pub fn with_icon(mut self, icon: IconHandle) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Guess whether an APK is preinstalled from where it lives
    pub fn is_system_path(path_to_apk: &str) -> bool {
        SYSTEM_PARTITIONS
            .iter()
            .any(|partition| path_to_apk.starts_with(partition))
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    pub fn icon(&self) -> Option<&IconHandle> {
        self.icon.as_ref()
    }

    pub fn path_to_apk(&self) -> &str {
        &self.path_to_apk
    }

    pub fn is_system_app(&self) -> bool {
        self.is_system_app
    }

    /// Resolve the icon through whoever owns it
    pub fn resolve_icon<'c, C: IconCache>(&self, cache: &'c C) -> Option<&'c C::Image> {
        cache.icon(self.icon.as_ref()?)
    }
}

impl StableHash for AppBasicInfo {
    fn stable_hash(&self) -> i32 {
        HashAccumulator::new()
            .push(&self.package_name)
            .push(&self.application_name)
            .push(&self.icon)
            .push(&self.path_to_apk)
            .push(&self.is_system_app)
            .finish()
    }
}

impl Display for AppBasicInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AppBasicInfo{{packageName='{}', applicationName='{}', pathToApk='{}', isSystemApp={}}}",
            self.package_name, self.application_name, self.path_to_apk, self.is_system_app
        )
    }
}
