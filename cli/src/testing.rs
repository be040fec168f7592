use std::fs;
use std::{env, path::PathBuf};

use rand::Rng;
use rstest::fixture;
use serde::Serialize;

use apkfp::model::{
    ActivityData, AnalysisMode, AppDetailData, FeatureData, FileEntry, GeneralData,
    ServiceData,
};

pub struct TmpDir {
    temp_dir: PathBuf,
}

impl TmpDir {
    pub fn path(&self) -> &PathBuf {
        &self.temp_dir
    }

    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> PathBuf {
        let path = self.temp_dir.join(name);
        let json = serde_json::to_string(value).expect("serialize test value");
        fs::write(&path, json).expect("failed to write temp file");
        path
    }
}

impl Drop for TmpDir {
    fn drop(&mut self) {
        _ = fs::remove_dir_all(&self.temp_dir);
    }
}

#[fixture]
pub fn tmp_dir() -> TmpDir {
    let rand_name: u32 = rand::thread_rng().gen();
    let temp_dir = env::temp_dir().join(format!("apkfp-cli-{}", rand_name));
    fs::create_dir_all(&temp_dir).expect("failed to make temp directory");
    TmpDir { temp_dir }
}

/// Small analysis result covering the categories the commands print
pub fn minimal_detail() -> AppDetailData {
    let mut general = GeneralData::new("com.example.notes");
    general.application_name = Some("Notes".into());
    general.version_name = Some("1.0".into());
    general.version_code = 1;
    general.apk_size = 4096;
    general.min_sdk_version = 24;
    general.target_sdk_version = 34;

    let mut detail = AppDetailData::new(AnalysisMode::ApkFile, general);
    detail.activity_data = vec![
        ActivityData::new("com.example.notes.MainActivity"),
        ActivityData::new("com.example.notes.EditorActivity"),
    ];
    detail.service_data = vec![ServiceData::new("com.example.notes.SyncService")];
    detail.feature_data = vec![FeatureData::new("android.hardware.camera", false)];
    detail.permission_data.uses_permissions = vec!["android.permission.INTERNET".into()];
    detail.file_data.push(FileEntry::new("classes.dex", "0d1e2f"));
    detail.file_data.push(FileEntry::new("res/layout/main.xml", "33cc"));
    detail
}
