use std::path::Path;

use serde_json::Value;

use crate::model::AppDetailData;
use crate::server_data::ServerSideAppData;
use crate::utils::{path_str, read_file};

/// Either an analysis result or an already exported record
#[derive(Debug, Clone)]
pub enum Input {
    Detail(Box<AppDetailData>),
    Record(Box<ServerSideAppData>),
}

impl Input {
    /// Turn the input into an export record, building it if needed. The
    /// device id is only used for analysis results.
    pub fn into_record(self, device_id: &str) -> ServerSideAppData {
        match self {
            Self::Detail(detail) => ServerSideAppData::new(detail.as_ref(), device_id),
            Self::Record(record) => *record,
        }
    }
}

pub fn load_detail_from_str(raw: &str) -> crate::Result<AppDetailData> {
    Ok(serde_json::from_str(raw)?)
}

/// Read an analysis result from a JSON file
pub fn load_detail(path: &Path) -> crate::Result<AppDetailData> {
    log::debug!("loading analysis result from {}", path_str(path));
    let raw = read_file(path)?;
    load_detail_from_str(&raw)
}

fn looks_like_record(value: &Value) -> bool {
    value
        .as_object()
        .map_or(false, |obj| obj.contains_key("hash") && obj.contains_key("androidId"))
}

pub fn load_input_from_str(raw: &str) -> crate::Result<Input> {
    let value: Value = serde_json::from_str(raw)?;
    if looks_like_record(&value) {
        let record: ServerSideAppData = serde_json::from_value(value)?;
        if !record.is_consistent() {
            log::warn!(
                "record for {} doesn't match its own fingerprint {}",
                record.package_name(),
                record.fingerprint()
            );
        }
        Ok(Input::Record(Box::new(record)))
    } else {
        let detail: AppDetailData = serde_json::from_value(value)?;
        Ok(Input::Detail(Box::new(detail)))
    }
}

/// Read either an analysis result or an export record from a JSON file
pub fn load_input(path: &Path) -> crate::Result<Input> {
    log::debug!("loading {}", path_str(path));
    let raw = read_file(path)?;
    load_input_from_str(&raw)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{sample_detail, tmp_dir, TmpDir};
    use rstest::*;

    #[rstest]
    fn test_load_detail(tmp_dir: TmpDir) {
        let detail = sample_detail();
        let json = serde_json::to_string(&detail).unwrap();
        let path = tmp_dir.create_file_name("detail.json", Some(&json));
        assert_eq!(load_detail(&path).unwrap(), detail);
    }

    #[test]
    fn test_load_detail_bad_json() {
        assert!(matches!(
            load_detail_from_str("{\"analysisMode\": 3}"),
            Err(crate::Error::Json(_))
        ));
    }

    #[test]
    fn test_load_input_detects_kind() {
        let detail = sample_detail();
        let record = ServerSideAppData::new(&detail, "dev");

        let from_detail =
            load_input_from_str(&serde_json::to_string(&detail).unwrap()).unwrap();
        assert!(matches!(from_detail, Input::Detail(_)));
        assert_eq!(from_detail.into_record("dev"), record);

        let from_record =
            load_input_from_str(&serde_json::to_string(&record).unwrap()).unwrap();
        assert!(matches!(from_record, Input::Record(_)));
        // the stored device id wins
        assert_eq!(from_record.into_record("other"), record);
    }
}
