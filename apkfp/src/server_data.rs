//! Flat export record uploaded for duplicate detection.
//!
//! The serialized field names and the fields covered by the overall `hash`
//! are shared with records already stored server side. Neither may change
//! without a migration.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::hash::{hash_list, HashAccumulator};
use crate::model::{component_names, AnalysisMode, AppDetailData, AppSource, Component, FileData};

/// Repeated-name categories of the export record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Activities,
    Services,
    ContentProviders,
    BroadcastReceivers,
    DefinedPermissions,
    UsedPermissions,
    Features,
    Drawables,
    Layouts,
    Assets,
    Others,
    PackageClasses,
    OtherClasses,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Self::Activities,
        Self::Services,
        Self::ContentProviders,
        Self::BroadcastReceivers,
        Self::DefinedPermissions,
        Self::UsedPermissions,
        Self::Features,
        Self::Drawables,
        Self::Layouts,
        Self::Assets,
        Self::Others,
        Self::PackageClasses,
        Self::OtherClasses,
    ];

    /// Whether the aggregated hash is computed over the exported items
    /// themselves. Component categories hash the full records, so only the
    /// names are available here.
    pub fn hash_covers_items(&self) -> bool {
        !matches!(
            self,
            Self::Activities
                | Self::Services
                | Self::ContentProviders
                | Self::BroadcastReceivers
                | Self::Features
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activities => "activities",
            Self::Services => "services",
            Self::ContentProviders => "content providers",
            Self::BroadcastReceivers => "broadcast receivers",
            Self::DefinedPermissions => "defined permissions",
            Self::UsedPermissions => "used permissions",
            Self::Features => "features",
            Self::Drawables => "drawables",
            Self::Layouts => "layouts",
            Self::Assets => "assets",
            Self::Others => "other files",
            Self::PackageClasses => "package classes",
            Self::OtherClasses => "other classes",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Count, items and aggregated hash of one [Category]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySummary<'a> {
    pub category: Category,
    pub count: i32,
    pub aggregated_hash: i32,
    /// `None` for other classes, which are only exported as count and hash
    pub items: Option<&'a [String]>,
}

impl<'a> CategorySummary<'a> {
    /// Count matches the items and, where possible, the hash does too
    pub fn is_consistent(&self) -> bool {
        let Some(items) = self.items else {
            return true;
        };
        if self.count != len_to_count(items.len()) {
            return false;
        }
        !self.category.hash_covers_items() || hash_list(items) == self.aggregated_hash
    }
}

/// Counts saturate at `i32::MAX` instead of wrapping negative
fn len_to_count(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

fn count<T>(items: &[T]) -> i32 {
    len_to_count(items.len())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSideAppData {
    /// ID of the device which uploaded this record
    android_id: String,

    /// Combined hash of the record, identifies two exactly same builds
    hash: i32,

    analysis_mode: AnalysisMode,

    package_name: String,
    application_name: Option<String>,
    version_name: Option<String>,
    version_code: i32,
    source: AppSource,
    apk_size: i64,
    min_sdk_version: i32,
    target_sdk_version: i32,

    sign_algorithm: Option<String>,
    start_date: i64,
    end_date: i64,
    public_key_md5: Option<String>,
    cert_md5: Option<String>,
    serial_number: i32,
    issuer_name: Option<String>,
    issuer_organization: Option<String>,
    issuer_country: Option<String>,
    subject_name: Option<String>,
    subject_organization: Option<String>,
    subject_country: Option<String>,

    number_activities: i32,
    activity_names: Vec<String>,
    activities_aggregated_hash: i32,

    number_services: i32,
    service_names: Vec<String>,
    services_aggregated_hash: i32,

    number_content_providers: i32,
    content_provider_names: Vec<String>,
    providers_aggregated_hash: i32,

    number_broadcast_receivers: i32,
    broadcast_receiver_names: Vec<String>,
    receivers_aggregated_hash: i32,

    number_defined_permissions: i32,
    defined_permissions: Vec<String>,
    defined_perm_aggregated_hash: i32,

    number_used_permissions: i32,
    used_permissions: Vec<String>,
    used_perm_aggregated_hash: i32,

    number_features: i32,
    feature_names: Vec<String>,
    features_aggregated_hash: i32,

    dex_hash: Option<String>,
    arsc_hash: Option<String>,
    drawable_hashes: Vec<String>,
    layout_hashes: Vec<String>,
    asset_hashes: Vec<String>,
    other_hashes: Vec<String>,

    number_drawables: i32,
    number_layouts: i32,
    number_assets: i32,
    number_others: i32,

    drawables_aggregated_hash: i32,
    layouts_aggregated_hash: i32,
    assets_aggregated_hash: i32,
    other_aggregated_hash: i32,

    number_different_drawables: i32,
    number_different_layouts: i32,
    png_drawables: i32,
    nine_patch_drawables: i32,
    jpg_drawables: i32,
    gif_drawables: i32,
    xml_drawables: i32,
    ldpi_drawables: i32,
    mdpi_drawables: i32,
    hdpi_drawables: i32,
    xhdpi_drawables: i32,
    xxhdpi_drawables: i32,
    xxxhdpi_drawables: i32,
    nodpi_drawables: i32,
    tvdpi_drawables: i32,
    unspecified_dpi_drawables: i32,

    package_classes: Vec<String>,
    package_classes_aggregated_hash: i32,
    number_package_classes: i32,
    other_classes_aggregated_hash: i32,
    number_other_classes: i32,
}

impl ServerSideAppData {
    /// Flatten an analysis result into the export record and compute its
    /// fingerprint.
    pub fn new<A, S, P, R, F>(
        detail: &AppDetailData<A, S, P, R, F>,
        device_id: impl Into<String>,
    ) -> Self
    where
        A: Component,
        S: Component,
        P: Component,
        R: Component,
        F: Component,
    {
        let general = &detail.general_data;
        let cert = &detail.certificate_data;
        let perms = &detail.permission_data;
        let files = &detail.file_data;
        let res = &detail.resource_data;
        let classes = &detail.class_path_data;

        let drawable_hashes = FileData::only_hash(&files.drawable_hashes);
        let layout_hashes = FileData::only_hash(&files.layout_hashes);
        let asset_hashes = FileData::only_hash(&files.asset_hashes);
        let other_hashes = FileData::only_hash(&files.other_hashes);

        let mut data = Self {
            android_id: device_id.into(),
            hash: 0,
            analysis_mode: detail.analysis_mode,

            package_name: general.package_name.clone(),
            application_name: general.application_name.clone(),
            version_name: general.version_name.clone(),
            version_code: general.version_code,
            source: general.source,
            apk_size: general.apk_size,
            min_sdk_version: general.min_sdk_version,
            target_sdk_version: general.target_sdk_version,

            sign_algorithm: cert.sign_algorithm.clone(),
            start_date: cert.start_date,
            end_date: cert.end_date,
            public_key_md5: cert.public_key_md5.clone(),
            cert_md5: cert.cert_md5.clone(),
            serial_number: cert.serial_number,
            issuer_name: cert.issuer_name.clone(),
            issuer_organization: cert.issuer_organization.clone(),
            issuer_country: cert.issuer_country.clone(),
            subject_name: cert.subject_name.clone(),
            subject_organization: cert.subject_organization.clone(),
            subject_country: cert.subject_country.clone(),

            number_activities: count(&detail.activity_data),
            activity_names: component_names(&detail.activity_data),
            activities_aggregated_hash: hash_list(&detail.activity_data),

            number_services: count(&detail.service_data),
            service_names: component_names(&detail.service_data),
            services_aggregated_hash: hash_list(&detail.service_data),

            number_content_providers: count(&detail.content_provider_data),
            content_provider_names: component_names(&detail.content_provider_data),
            providers_aggregated_hash: hash_list(&detail.content_provider_data),

            number_broadcast_receivers: count(&detail.broadcast_receiver_data),
            broadcast_receiver_names: component_names(&detail.broadcast_receiver_data),
            receivers_aggregated_hash: hash_list(&detail.broadcast_receiver_data),

            number_defined_permissions: count(&perms.defines_permissions),
            defined_permissions: perms.defines_permissions.clone(),
            defined_perm_aggregated_hash: hash_list(&perms.defines_permissions),

            number_used_permissions: count(&perms.uses_permissions),
            used_permissions: perms.uses_permissions.clone(),
            used_perm_aggregated_hash: hash_list(&perms.uses_permissions),

            number_features: count(&detail.feature_data),
            feature_names: component_names(&detail.feature_data),
            features_aggregated_hash: hash_list(&detail.feature_data),

            dex_hash: files.dex_hash.clone(),
            arsc_hash: files.arsc_hash.clone(),

            number_drawables: count(&drawable_hashes),
            number_layouts: count(&layout_hashes),
            number_assets: count(&asset_hashes),
            number_others: count(&other_hashes),

            drawables_aggregated_hash: hash_list(&drawable_hashes),
            layouts_aggregated_hash: hash_list(&layout_hashes),
            assets_aggregated_hash: hash_list(&asset_hashes),
            other_aggregated_hash: hash_list(&other_hashes),

            drawable_hashes,
            layout_hashes,
            asset_hashes,
            other_hashes,

            number_different_drawables: res.different_drawables,
            number_different_layouts: res.different_layouts,
            png_drawables: res.png_drawables,
            nine_patch_drawables: res.nine_patch_drawables,
            jpg_drawables: res.jpg_drawables,
            gif_drawables: res.gif_drawables,
            xml_drawables: res.xml_drawables,
            ldpi_drawables: res.ldpi_drawables,
            mdpi_drawables: res.mdpi_drawables,
            hdpi_drawables: res.hdpi_drawables,
            xhdpi_drawables: res.xhdpi_drawables,
            xxhdpi_drawables: res.xxhdpi_drawables,
            xxxhdpi_drawables: res.xxxhdpi_drawables,
            nodpi_drawables: res.nodpi_drawables,
            tvdpi_drawables: res.tvdpi_drawables,
            unspecified_dpi_drawables: res.unspecified_dpi_drawables,

            package_classes: classes.package_classes.clone(),
            package_classes_aggregated_hash: hash_list(&classes.package_classes),
            number_package_classes: count(&classes.package_classes),
            other_classes_aggregated_hash: hash_list(&classes.other_classes),
            number_other_classes: count(&classes.other_classes),
        };

        data.hash = data.compute_overall_hash();

        log::debug!(
            "fingerprint {} for {} ({})",
            data.hash,
            data.package_name,
            data.analysis_mode
        );
        for summary in data.categories() {
            log::trace!(
                "  {}: {} items, aggregated hash {}",
                summary.category,
                summary.count,
                summary.aggregated_hash
            );
        }

        data
    }

    /// Overall hash over the fingerprint fields. Name lists are left out,
    /// their aggregated hashes already cover them. The order is fixed.
    fn compute_overall_hash(&self) -> i32 {
        HashAccumulator::new()
            .push(&self.package_name)
            .push(&self.application_name)
            .push(&self.version_name)
            .push(&self.version_code)
            .push(&self.apk_size)
            .push(&self.min_sdk_version)
            .push(&self.target_sdk_version)
            .push(&self.public_key_md5)
            .push(&self.cert_md5)
            .push(&self.number_activities)
            .push(&self.activities_aggregated_hash)
            .push(&self.number_services)
            .push(&self.services_aggregated_hash)
            .push(&self.number_content_providers)
            .push(&self.providers_aggregated_hash)
            .push(&self.number_broadcast_receivers)
            .push(&self.receivers_aggregated_hash)
            .push(&self.number_defined_permissions)
            .push(&self.defined_perm_aggregated_hash)
            .push(&self.number_used_permissions)
            .push(&self.used_perm_aggregated_hash)
            .push(&self.number_features)
            .push(&self.features_aggregated_hash)
            .push(&self.dex_hash)
            .push(&self.arsc_hash)
            .push(&self.number_drawables)
            .push(&self.number_layouts)
            .push(&self.number_assets)
            .push(&self.number_others)
            .push(&self.drawables_aggregated_hash)
            .push(&self.layouts_aggregated_hash)
            .push(&self.assets_aggregated_hash)
            .push(&self.other_aggregated_hash)
            .push(&self.number_different_drawables)
            .push(&self.number_different_layouts)
            .push(&self.png_drawables)
            .push(&self.nine_patch_drawables)
            .push(&self.jpg_drawables)
            .push(&self.gif_drawables)
            .push(&self.xml_drawables)
            .push(&self.ldpi_drawables)
            .push(&self.mdpi_drawables)
            .push(&self.hdpi_drawables)
            .push(&self.xhdpi_drawables)
            .push(&self.xxhdpi_drawables)
            .push(&self.xxxhdpi_drawables)
            .push(&self.nodpi_drawables)
            .push(&self.tvdpi_drawables)
            .push(&self.unspecified_dpi_drawables)
            // classes push the hash before the count
            .push(&self.package_classes_aggregated_hash)
            .push(&self.number_package_classes)
            .push(&self.other_classes_aggregated_hash)
            .push(&self.number_other_classes)
            .finish()
    }

    /// The overall fingerprint
    pub fn fingerprint(&self) -> i32 {
        self.hash
    }

    pub fn android_id(&self) -> &str {
        &self.android_id
    }

    pub fn analysis_mode(&self) -> AnalysisMode {
        self.analysis_mode
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn application_name(&self) -> Option<&str> {
        self.application_name.as_deref()
    }

    pub fn version_name(&self) -> Option<&str> {
        self.version_name.as_deref()
    }

    pub fn version_code(&self) -> i32 {
        self.version_code
    }

    pub fn source(&self) -> AppSource {
        self.source
    }

    pub fn cert_md5(&self) -> Option<&str> {
        self.cert_md5.as_deref()
    }

    pub fn end_date(&self) -> i64 {
        self.end_date
    }

    pub fn summary(&self, category: Category) -> CategorySummary<'_> {
        let (count, aggregated_hash, items) = match category {
            Category::Activities => (
                self.number_activities,
                self.activities_aggregated_hash,
                Some(&self.activity_names),
            ),
            Category::Services => (
                self.number_services,
                self.services_aggregated_hash,
                Some(&self.service_names),
            ),
            Category::ContentProviders => (
                self.number_content_providers,
                self.providers_aggregated_hash,
                Some(&self.content_provider_names),
            ),
            Category::BroadcastReceivers => (
                self.number_broadcast_receivers,
                self.receivers_aggregated_hash,
                Some(&self.broadcast_receiver_names),
            ),
            Category::DefinedPermissions => (
                self.number_defined_permissions,
                self.defined_perm_aggregated_hash,
                Some(&self.defined_permissions),
            ),
            Category::UsedPermissions => (
                self.number_used_permissions,
                self.used_perm_aggregated_hash,
                Some(&self.used_permissions),
            ),
            Category::Features => (
                self.number_features,
                self.features_aggregated_hash,
                Some(&self.feature_names),
            ),
            Category::Drawables => (
                self.number_drawables,
                self.drawables_aggregated_hash,
                Some(&self.drawable_hashes),
            ),
            Category::Layouts => (
                self.number_layouts,
                self.layouts_aggregated_hash,
                Some(&self.layout_hashes),
            ),
            Category::Assets => (
                self.number_assets,
                self.assets_aggregated_hash,
                Some(&self.asset_hashes),
            ),
            Category::Others => (
                self.number_others,
                self.other_aggregated_hash,
                Some(&self.other_hashes),
            ),
            Category::PackageClasses => (
                self.number_package_classes,
                self.package_classes_aggregated_hash,
                Some(&self.package_classes),
            ),
            Category::OtherClasses => (
                self.number_other_classes,
                self.other_classes_aggregated_hash,
                None,
            ),
        };

        CategorySummary {
            category,
            count,
            aggregated_hash,
            items: items.map(|it| it.as_slice()),
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = CategorySummary<'_>> + '_ {
        Category::ALL.into_iter().map(move |c| self.summary(c))
    }

    /// Scalar fields covered by the fingerprint, rendered for display
    fn scalar_signals(&self) -> Vec<(&'static str, String)> {
        fn opt(v: &Option<String>) -> String {
            v.clone().unwrap_or_default()
        }

        vec![
            ("packageName", self.package_name.clone()),
            ("applicationName", opt(&self.application_name)),
            ("versionName", opt(&self.version_name)),
            ("versionCode", self.version_code.to_string()),
            ("apkSize", self.apk_size.to_string()),
            ("minSdkVersion", self.min_sdk_version.to_string()),
            ("targetSdkVersion", self.target_sdk_version.to_string()),
            ("publicKeyMd5", opt(&self.public_key_md5)),
            ("certMd5", opt(&self.cert_md5)),
            ("dexHash", opt(&self.dex_hash)),
            ("arscHash", opt(&self.arsc_hash)),
            ("numberDifferentDrawables", self.number_different_drawables.to_string()),
            ("numberDifferentLayouts", self.number_different_layouts.to_string()),
            ("pngDrawables", self.png_drawables.to_string()),
            ("ninePatchDrawables", self.nine_patch_drawables.to_string()),
            ("jpgDrawables", self.jpg_drawables.to_string()),
            ("gifDrawables", self.gif_drawables.to_string()),
            ("xmlDrawables", self.xml_drawables.to_string()),
            ("ldpiDrawables", self.ldpi_drawables.to_string()),
            ("mdpiDrawables", self.mdpi_drawables.to_string()),
            ("hdpiDrawables", self.hdpi_drawables.to_string()),
            ("xhdpiDrawables", self.xhdpi_drawables.to_string()),
            ("xxhdpiDrawables", self.xxhdpi_drawables.to_string()),
            ("xxxhdpiDrawables", self.xxxhdpi_drawables.to_string()),
            ("nodpiDrawables", self.nodpi_drawables.to_string()),
            ("tvdpiDrawables", self.tvdpi_drawables.to_string()),
            ("unspecifiedDpiDrawables", self.unspecified_dpi_drawables.to_string()),
        ]
    }

    /// Every category is consistent and the stored fingerprint matches the
    /// fields. Records read back from storage may fail this.
    pub fn is_consistent(&self) -> bool {
        self.categories().all(|it| it.is_consistent())
            && self.hash == self.compute_overall_hash()
    }

    /// Explain which fingerprint inputs differ between two records
    pub fn diff(&self, other: &ServerSideAppData) -> FingerprintDiff {
        let fields = self
            .scalar_signals()
            .into_iter()
            .zip(other.scalar_signals())
            .filter(|(l, r)| l.1 != r.1)
            .map(|((name, left), (_, right))| FieldChange { name, left, right })
            .collect();

        let categories = self
            .categories()
            .zip(other.categories())
            .filter(|(l, r)| l.count != r.count || l.aggregated_hash != r.aggregated_hash)
            .map(|(l, r)| CategoryChange {
                category: l.category,
                left_count: l.count,
                right_count: r.count,
                left_hash: l.aggregated_hash,
                right_hash: r.aggregated_hash,
            })
            .collect();

        FingerprintDiff {
            left: self.hash,
            right: other.hash,
            fields,
            categories,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub name: &'static str,
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryChange {
    pub category: Category,
    pub left_count: i32,
    pub right_count: i32,
    pub left_hash: i32,
    pub right_hash: i32,
}

/// Result of [ServerSideAppData::diff]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintDiff {
    pub left: i32,
    pub right: i32,
    pub fields: Vec<FieldChange>,
    pub categories: Vec<CategoryChange>,
}

impl FingerprintDiff {
    /// Same fingerprint, the builds are considered duplicates
    pub fn is_duplicate(&self) -> bool {
        self.left == self.right
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.categories.is_empty()
    }
}

impl Display for FingerprintDiff {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_duplicate() {
            writeln!(f, "same fingerprint {}", self.left)?;
        } else {
            writeln!(f, "fingerprints differ: {} != {}", self.left, self.right)?;
        }
        for field in &self.fields {
            writeln!(f, "  {}: {:?} -> {:?}", field.name, field.left, field.right)?;
        }
        for change in &self.categories {
            writeln!(
                f,
                "  {}: {} items (hash {}) -> {} items (hash {})",
                change.category,
                change.left_count,
                change.left_hash,
                change.right_count,
                change.right_hash
            )?;
        }
        Ok(())
    }
}
