use std::fmt::Display;

#[derive(Debug, PartialEq, Eq, serde::Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub enum Projection {
    Full,
    NoAcl,
}

/// See [GCS buckets list API reference](https://cloud.google.com/storage/docs/json_api/v1/buckets/list)
#[derive(Debug, PartialEq, Eq, serde::Serialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BucketsListRequest {
    pub project: String,
    pub max_results: Option<usize>,
    pub page_token: Option<String>,
    pub prefix: Option<String>,
    pub projection: Option<Projection>,
}

/// Bucket creation request body: only the desired name is sent, everything
/// else is left to the service defaults.
#[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BucketTemplate {
    pub name: String,
}

impl BucketTemplate {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }
}

/// Buckets list response
#[derive(Debug, serde::Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Buckets {
    pub kind: Option<String>,

    #[serde(default = "Vec::new")]
    pub items: Vec<Bucket>,

    pub next_page_token: Option<String>,
}

/// Partial view over the bucket resource, only the fields this crate reads.
#[derive(Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub name: String,
    pub id: Option<String>,
    pub self_link: Option<String>,
    pub location: Option<String>,
    pub storage_class: Option<String>,
    pub time_created: Option<chrono::DateTime<chrono::Utc>>,
    pub updated: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, deserialize_with = "from_string_option")]
    pub project_number: Option<u64>,
    pub etag: Option<String>,
}

impl Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gs://{}", &self.name)
    }
}

const BASE_URL: &str = "https://storage.googleapis.com/storage/v1";

fn percent_encode(input: &str) -> String {
    percent_encoding::utf8_percent_encode(input, percent_encoding::NON_ALPHANUMERIC).to_string()
}

/// `<https://cloud.google.com/storage/docs/json_api/v1/buckets>`
pub(in crate::gcp::storage) fn buckets_url() -> String {
    format!("{}/b", BASE_URL)
}

pub(in crate::gcp::storage) fn bucket_url(bucket_name: &str) -> String {
    format!("{}/b/{}", BASE_URL, percent_encode(bucket_name))
}

fn from_string_option<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    D: serde::Deserializer<'de>,
{
    use serde::{de::Error, Deserialize};
    use serde_json::Value;
    match Deserialize::deserialize(deserializer) {
        Ok(Value::String(s)) => T::from_str(&s).map(Option::from).map_err(Error::custom),
        Ok(Value::Number(num)) => T::from_str(&num.to_string())
            .map(Option::from)
            .map_err(Error::custom),
        Ok(value) => Err(Error::custom(format!(
            "Wrong type, expected type {} but got value {:?}",
            std::any::type_name::<T>(),
            value,
        ))),
        Err(_) => Ok(None),
    }
}
