use serde::{Deserialize, Deserializer, Serialize};

/// The key has to be present, `null` is fine
fn present<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer)
}

/// Signing certificate summary extracted by the analyzer. Nothing here is
/// validated, these are the values as read from the certificate. Both
/// digests are fingerprinted, so their keys are required even when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CertificateData {
    #[serde(default)]
    pub sign_algorithm: Option<String>,
    /// Start of validity, epoch millis
    #[serde(default)]
    pub start_date: i64,
    /// End of validity, epoch millis
    #[serde(default)]
    pub end_date: i64,
    #[serde(deserialize_with = "present")]
    pub public_key_md5: Option<String>,
    #[serde(deserialize_with = "present")]
    pub cert_md5: Option<String>,
    #[serde(default)]
    pub serial_number: i32,
    #[serde(default)]
    pub issuer_name: Option<String>,
    #[serde(default)]
    pub issuer_organization: Option<String>,
    #[serde(default)]
    pub issuer_country: Option<String>,
    #[serde(default)]
    pub subject_name: Option<String>,
    #[serde(default)]
    pub subject_organization: Option<String>,
    #[serde(default)]
    pub subject_country: Option<String>,
}

impl CertificateData {
    /// Self signed certificates carry the same issuer and subject
    pub fn is_self_signed(&self) -> bool {
        self.issuer_name.is_some()
            && self.issuer_name == self.subject_name
            && self.issuer_organization == self.subject_organization
            && self.issuer_country == self.subject_country
    }

    /// Whether the certificate was valid at the given epoch millis
    pub fn valid_at(&self, millis: i64) -> bool {
        self.start_date <= millis && millis <= self.end_date
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::*;

    fn cert() -> CertificateData {
        CertificateData {
            sign_algorithm: Some("SHA256withRSA".into()),
            start_date: 1_000,
            end_date: 2_000,
            issuer_name: Some("Android".into()),
            subject_name: Some("Android".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_self_signed() {
        let mut c = cert();
        assert!(c.is_self_signed());
        c.subject_name = Some("Someone else".into());
        assert!(!c.is_self_signed());
        assert!(!CertificateData::default().is_self_signed());
    }

    #[test]
    fn test_valid_at() {
        let c = cert();
        assert!(c.valid_at(1_000));
        assert!(c.valid_at(1_500));
        assert!(c.valid_at(2_000));
        assert!(!c.valid_at(999));
        assert!(!c.valid_at(2_001));
    }

    #[rstest]
    #[case(r#"{}"#, Some("publicKeyMd5"))]
    #[case(r#"{"publicKeyMd5": "aa"}"#, Some("certMd5"))]
    #[case(r#"{"publicKeyMd5": null, "certMd5": null}"#, None)]
    #[case(r#"{"publicKeyMd5": "aa", "certMd5": "bb", "serialNumber": 7}"#, None)]
    fn test_digest_keys_required(#[case] raw: &str, #[case] missing: Option<&str>) {
        let res: Result<CertificateData, _> = serde_json::from_str(raw);
        match missing {
            Some(key) => {
                let err = res.unwrap_err().to_string();
                assert!(err.contains(key), "{}", err);
            }
            None => {
                let cert = res.unwrap();
                assert_eq!(cert.start_date, 0);
                assert!(cert.issuer_name.is_none());
            }
        }
    }

    #[test]
    fn test_round_trip_without_digests() {
        let c = cert();
        let json = serde_json::to_string(&c).unwrap();
        let back: CertificateData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
