use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Context as AnyhowContext;
use apkfp::ServerSideAppData;

/// Write the record as JSON to `out`, or stdout when not given
pub fn write_record(
    record: &ServerSideAppData,
    out: Option<&Path>,
    pretty: bool,
) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            let f = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            let mut w = BufWriter::new(f);
            write_json(&mut w, record, pretty)?;
            w.flush()?;
            log::info!("wrote record for {} to {}", record.package_name(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_json(&mut lock, record, pretty)?;
        }
    }
    Ok(())
}

fn write_json<W: Write>(w: &mut W, record: &ServerSideAppData, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *w, record)?;
    } else {
        serde_json::to_writer(&mut *w, record)?;
    }
    writeln!(w)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{minimal_detail, tmp_dir, TmpDir};
    use rstest::*;

    #[test]
    fn test_write_json_compact_and_pretty() {
        let record = ServerSideAppData::new(&minimal_detail(), "dev");

        let mut compact = Vec::new();
        write_json(&mut compact, &record, false).unwrap();
        let compact = String::from_utf8(compact).unwrap();
        assert_eq!(compact.lines().count(), 1);

        let mut pretty = Vec::new();
        write_json(&mut pretty, &record, true).unwrap();
        let pretty = String::from_utf8(pretty).unwrap();
        assert!(pretty.lines().count() > 1);

        let a: serde_json::Value = serde_json::from_str(&compact).unwrap();
        let b: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(a, b);
    }

    #[rstest]
    fn test_write_record_to_file(tmp_dir: TmpDir) {
        let record = ServerSideAppData::new(&minimal_detail(), "dev");
        let path = tmp_dir.path().join("out.json");
        write_record(&record, Some(&path), false).unwrap();

        let back: ServerSideAppData =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, record);
    }
}
