use serde::{Deserialize, Serialize};

/// Counters over the resources packaged in the APK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceData {
    pub different_drawables: i32,
    pub different_layouts: i32,

    pub png_drawables: i32,
    pub nine_patch_drawables: i32,
    pub jpg_drawables: i32,
    pub gif_drawables: i32,
    pub xml_drawables: i32,

    pub ldpi_drawables: i32,
    pub mdpi_drawables: i32,
    pub hdpi_drawables: i32,
    pub xhdpi_drawables: i32,
    pub xxhdpi_drawables: i32,
    pub xxxhdpi_drawables: i32,
    pub nodpi_drawables: i32,
    pub tvdpi_drawables: i32,
    pub unspecified_dpi_drawables: i32,
}

impl ResourceData {
    /// Count a drawable file into the format and density counters. Does not
    /// touch `different_drawables`, which counts names rather than files.
    pub fn count_drawable(&mut self, path: &str) {
        let (dir, file) = match path.rsplit_once('/') {
            Some(v) => v,
            None => ("", path),
        };

        if file.ends_with(".9.png") {
            self.nine_patch_drawables += 1;
        } else if file.ends_with(".png") {
            self.png_drawables += 1;
        } else if file.ends_with(".jpg") || file.ends_with(".jpeg") {
            self.jpg_drawables += 1;
        } else if file.ends_with(".gif") {
            self.gif_drawables += 1;
        } else if file.ends_with(".xml") {
            self.xml_drawables += 1;
        }

        let qualifiers = dir.rsplit('/').next().unwrap_or_default();
        let density = qualifiers
            .split('-')
            .skip(1)
            .find(|q| q.ends_with("dpi"));

        let counter = match density {
            Some("ldpi") => &mut self.ldpi_drawables,
            Some("mdpi") => &mut self.mdpi_drawables,
            Some("hdpi") => &mut self.hdpi_drawables,
            Some("xhdpi") => &mut self.xhdpi_drawables,
            Some("xxhdpi") => &mut self.xxhdpi_drawables,
            Some("xxxhdpi") => &mut self.xxxhdpi_drawables,
            Some("nodpi") => &mut self.nodpi_drawables,
            Some("tvdpi") => &mut self.tvdpi_drawables,
            _ => &mut self.unspecified_dpi_drawables,
        };
        *counter += 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_count_drawable() {
        let mut res = ResourceData::default();
        res.count_drawable("res/drawable-hdpi-v4/icon.png");
        res.count_drawable("res/drawable-xxhdpi/btn.9.png");
        res.count_drawable("res/drawable/shape.xml");
        res.count_drawable("res/drawable-nodpi/photo.jpg");
        res.count_drawable("res/drawable-anydpi-v21/vector.xml");

        assert_eq!(res.png_drawables, 1);
        assert_eq!(res.nine_patch_drawables, 1);
        assert_eq!(res.xml_drawables, 2);
        assert_eq!(res.jpg_drawables, 1);
        assert_eq!(res.hdpi_drawables, 1);
        assert_eq!(res.xxhdpi_drawables, 1);
        assert_eq!(res.nodpi_drawables, 1);
        // plain drawable/ and anydpi
        assert_eq!(res.unspecified_dpi_drawables, 2);
        assert_eq!(res.different_drawables, 0);
    }

    #[test]
    fn test_missing_counters_default_to_zero() {
        let res: ResourceData = serde_json::from_str(r#"{"pngDrawables": 4}"#).unwrap();
        assert_eq!(res.png_drawables, 4);
        assert_eq!(res.tvdpi_drawables, 0);
    }
}
