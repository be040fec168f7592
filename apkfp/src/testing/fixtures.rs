use crate::hash::StableHash;
use crate::model::*;

/// Component whose stable hash is the hash of its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedComponent(String);

impl NamedComponent {
    pub fn new(name: &str) -> Self {
        Self(name.into())
    }
}

impl StableHash for NamedComponent {
    fn stable_hash(&self) -> i32 {
        self.0.stable_hash()
    }
}

impl Component for NamedComponent {
    fn name(&self) -> &str {
        &self.0
    }
}

/// Realistic analysis result with every category populated
pub fn sample_detail() -> AppDetailData {
    let mut general = GeneralData::new("com.example.notes");
    general.application_name = Some("Notes".into());
    general.version_name = Some("4.2.0".into());
    general.version_code = 42;
    general.source = AppSource::GooglePlay;
    general.apk_size = 5_242_880;
    general.min_sdk_version = 24;
    general.target_sdk_version = 34;
    general.apk_directory = Some("/data/app/com.example.notes-1/base.apk".into());

    let mut detail = AppDetailData::new(AnalysisMode::InstalledPackage, general);

    detail.certificate_data = CertificateData {
        sign_algorithm: Some("SHA256withRSA".into()),
        start_date: 1_500_000_000_000,
        end_date: 2_500_000_000_000,
        public_key_md5: Some("6a1f0e6cbd9e33d1a4c8d3e7d8b2b0f1".into()),
        cert_md5: Some("c3f2a4b1e09d8877665544332211ffee".into()),
        serial_number: 1_234_567,
        issuer_name: Some("Example".into()),
        issuer_organization: Some("Example Org".into()),
        issuer_country: Some("US".into()),
        subject_name: Some("Example".into()),
        subject_organization: Some("Example Org".into()),
        subject_country: Some("US".into()),
    };

    let mut main = ActivityData::new("com.example.notes.MainActivity");
    main.exported = true;
    main.label = Some("Notes".into());
    let mut editor = ActivityData::new("com.example.notes.EditorActivity");
    editor.parent_name = Some("com.example.notes.MainActivity".into());
    let mut alias = ActivityData::new("com.example.notes.Launcher");
    alias.target_name = Some("com.example.notes.MainActivity".into());
    alias.exported = true;
    detail.activity_data = vec![main, editor, alias];

    let mut sync = ServiceData::new("com.example.notes.SyncService");
    sync.permission = Some("android.permission.BIND_JOB_SERVICE".into());
    detail.service_data = vec![sync, ServiceData::new("com.example.notes.BackupService")];

    let mut files = ContentProviderData::new("androidx.core.content.FileProvider");
    files.authority = Some("com.example.notes.files".into());
    files.grant_uri_permissions = true;
    detail.content_provider_data = vec![files];

    let mut boot = BroadcastReceiverData::new("com.example.notes.BootReceiver");
    boot.exported = true;
    detail.broadcast_receiver_data = vec![
        boot,
        BroadcastReceiverData::new("com.example.notes.AlarmReceiver"),
    ];

    detail.permission_data = PermissionData {
        defines_permissions: vec!["com.example.notes.permission.READ".into()],
        uses_permissions: vec![
            "android.permission.INTERNET".into(),
            "android.permission.RECEIVE_BOOT_COMPLETED".into(),
        ],
    };

    detail.feature_data = vec![
        FeatureData::new("android.hardware.camera", false),
        FeatureData::new("android.hardware.touchscreen", true),
    ];

    let mut file_data = FileData::default();
    for (path, hash) in [
        ("classes.dex", "0d1e2f"),
        ("resources.arsc", "a1b2c3"),
        ("res/drawable-hdpi-v4/icon.png", "11aa"),
        ("res/drawable/bg.xml", "22bb"),
        ("res/layout/main.xml", "33cc"),
        ("assets/notes.db", "44dd"),
        ("AndroidManifest.xml", "55ee"),
    ] {
        file_data.push(FileEntry::new(path, hash));
    }
    detail.file_data = file_data;

    let mut resources = ResourceData {
        different_drawables: 2,
        different_layouts: 1,
        ..Default::default()
    };
    resources.count_drawable("res/drawable-hdpi-v4/icon.png");
    resources.count_drawable("res/drawable/bg.xml");
    detail.resource_data = resources;

    detail.class_path_data = ClassPathData::from_classes(
        "com.example.notes",
        [
            "com.example.notes.MainActivity",
            "com.example.notes.EditorActivity",
            "com.example.notes.SyncService",
            "androidx.core.content.FileProvider",
            "kotlin.collections.CollectionsKt",
        ],
    );

    detail
}
