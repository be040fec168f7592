use std::fs;
use std::{env, path::PathBuf};

use rand::Rng;
use rstest::fixture;

/// Temporary directory removed on drop
pub struct TmpDir {
    temp_dir: PathBuf,
}

impl TmpDir {
    pub fn get_path(&self) -> &PathBuf {
        &self.temp_dir
    }

    pub fn create_file_name(&self, name: &str, content: Option<&str>) -> PathBuf {
        let path = self.temp_dir.join(name);

        let parent = path.parent().unwrap();

        if !parent.exists() {
            fs::create_dir_all(parent).expect("failed to create directories for new file");
        }

        fs::write(&path, content.unwrap_or_default()).expect("failed to make temp file");
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
    let base = env::temp_dir();
    let mut rng = rand::thread_rng();
    let rand_name: u32 = rng.gen();
    let temp_dir = base.join(format!("apkfp-{}", rand_name));
    let _ = fs::create_dir_all(&temp_dir);
    TmpDir { temp_dir }
}
