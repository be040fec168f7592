use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context as AnyhowContext};
use clap::Args;

use apkfp::config::Settings;
use apkfp::load::load_input;
use apkfp::{FingerprintDiff, ServerSideAppData};

use crate::fingerprint::{device_id_from_env, resolve_device_id};

#[derive(Args)]
pub struct Compare {
    /// Analysis result or export record
    left: PathBuf,

    /// Analysis result or export record
    right: PathBuf,

    /// Fail when the fingerprints differ
    #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
    strict: bool,
}

impl Compare {
    fn load(&self, path: &Path, device_id: &str) -> anyhow::Result<ServerSideAppData> {
        let input = load_input(path).with_context(|| format!("loading {}", path.display()))?;
        Ok(input.into_record(device_id))
    }

    /// Both sides as export records. Analysis results get the configured
    /// device id, export records keep their own.
    pub fn records(
        &self,
        settings: &Settings,
    ) -> anyhow::Result<(ServerSideAppData, ServerSideAppData)> {
        let device_id = resolve_device_id(None, settings, device_id_from_env());
        let left = self.load(&self.left, &device_id)?;
        let right = self.load(&self.right, &device_id)?;
        if left.package_name() != right.package_name() {
            log::warn!(
                "comparing different packages {} and {}",
                left.package_name(),
                right.package_name()
            );
        }
        Ok((left, right))
    }

    pub fn diff(&self, settings: &Settings) -> anyhow::Result<FingerprintDiff> {
        let (left, right) = self.records(settings)?;
        Ok(left.diff(&right))
    }

    /// Write the comparison, failing afterwards under `--strict` when the
    /// builds differ
    pub fn write_report<W: Write>(&self, w: &mut W, settings: &Settings) -> anyhow::Result<()> {
        let diff = self.diff(settings)?;
        write!(w, "{}", diff)?;
        if self.strict && !diff.is_duplicate() {
            bail!(
                "{} and {} are different builds",
                self.left.display(),
                self.right.display()
            );
        }
        Ok(())
    }

    pub fn run(&self, settings: &Settings) -> anyhow::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_report(&mut lock, settings)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{minimal_detail, tmp_dir, TmpDir};
    use apkfp::Category;
    use rstest::*;

    fn with_device(id: &str) -> Settings {
        Settings {
            device_id: Some(id.into()),
            ..Default::default()
        }
    }

    #[rstest]
    fn test_compare_detail_with_record(tmp_dir: TmpDir) {
        let detail = minimal_detail();
        let record = ServerSideAppData::new(&detail, "dev");
        let cmd = Compare {
            left: tmp_dir.write_json("detail.json", &detail),
            right: tmp_dir.write_json("record.json", &record),
            strict: true,
        };
        let diff = cmd.diff(&Settings::default()).unwrap();
        assert!(diff.is_duplicate());
        assert!(diff.is_empty());

        let mut out = Vec::new();
        cmd.write_report(&mut out, &Settings::default()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("same fingerprint {}\n", record.fingerprint())
        );
    }

    #[rstest]
    fn test_record_keeps_stored_device_id(tmp_dir: TmpDir) {
        let detail = minimal_detail();
        let record = ServerSideAppData::new(&detail, "stored-device");
        let cmd = Compare {
            left: tmp_dir.write_json("detail.json", &detail),
            right: tmp_dir.write_json("record.json", &record),
            strict: false,
        };

        let (left, right) = cmd.records(&with_device("configured")).unwrap();
        assert_eq!(left.android_id(), "configured");
        assert_eq!(right.android_id(), "stored-device");
        assert_eq!(right, record);
        assert_eq!(left.fingerprint(), right.fingerprint());
    }

    #[rstest]
    fn test_compare_different_builds(tmp_dir: TmpDir) {
        let detail = minimal_detail();
        let mut update = detail.clone();
        update.general_data.version_code += 1;
        update
            .permission_data
            .uses_permissions
            .push("android.permission.CAMERA".into());

        let cmd = Compare {
            left: tmp_dir.write_json("old.json", &detail),
            right: tmp_dir.write_json("new.json", &update),
            strict: false,
        };
        let diff = cmd.diff(&Settings::default()).unwrap();
        assert!(!diff.is_duplicate());
        assert_eq!(diff.fields.len(), 1);
        assert_eq!(diff.fields[0].name, "versionCode");
        assert_eq!(diff.categories.len(), 1);
        assert_eq!(diff.categories[0].category, Category::UsedPermissions);

        let old = ServerSideAppData::new(&detail, "");
        let new = ServerSideAppData::new(&update, "");
        let perms = (
            old.summary(Category::UsedPermissions).aggregated_hash,
            new.summary(Category::UsedPermissions).aggregated_hash,
        );
        let expected = format!(
            "fingerprints differ: {} != {}\n  versionCode: \"1\" -> \"2\"\n  used permissions: 1 items (hash {}) -> 2 items (hash {})\n",
            old.fingerprint(),
            new.fingerprint(),
            perms.0,
            perms.1
        );

        let mut out = Vec::new();
        cmd.write_report(&mut out, &Settings::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), expected);

        let strict = Compare {
            strict: true,
            ..cmd
        };
        let mut out = Vec::new();
        let err = strict
            .write_report(&mut out, &Settings::default())
            .unwrap_err();
        assert!(err.to_string().contains("different builds"));
        // the report is still written before failing
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
