mod bucket;
mod client;
mod resources;

pub use bucket::BucketClient;
pub use resources::bucket::{Bucket, BucketTemplate, Buckets, BucketsListRequest, Projection};

pub mod credentials {

    pub mod serviceaccount {

        use crate::gcp::oauth2::token::ServiceAccountCredentials;

        pub fn from_pem(
            client_email: &str,
            private_key_pem: &str,
            scope: &str,
        ) -> ServiceAccountCredentials {
            ServiceAccountCredentials::new(client_email, private_key_pem).with_scope(scope)
        }

        pub async fn from_pem_file<T>(
            client_email: &str,
            file_path: T,
            scope: &str,
        ) -> super::super::StorageResult<ServiceAccountCredentials>
        where
            T: AsRef<std::path::Path>,
        {
            ServiceAccountCredentials::from_pem_file(client_email, file_path)
                .await
                .map(|x| x.with_scope(scope))
                .map_err(super::super::Error::GcsTokenError)
        }
    }
}

#[derive(Debug)]
pub enum Error {
    GcsTokenError(super::oauth2::Error),
    GcsHttpError(reqwest::Error),
    GcsUnexpectedResponse {
        url: String,
        value: String,
    },
    GcsUnexpectedJson {
        url: String,
        expected_type: String,
        json: serde_json::Value,
    },
    GcsResourceNotFound {
        url: String,
    },
    GcsInvalidBucketName,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
impl std::error::Error for Error {}

impl Error {
    fn gcs_unexpected_response_error<T, U>(url: T, value: U) -> Self
    where
        T: AsRef<str>,
        U: AsRef<str>,
    {
        Self::GcsUnexpectedResponse {
            url: url.as_ref().to_owned(),
            value: value.as_ref().to_owned(),
        }
    }

    fn gcs_unexpected_json<T>(url: &str, json: serde_json::Value) -> Self {
        let expected_type = std::any::type_name::<T>().to_owned();
        Self::GcsUnexpectedJson {
            url: url.to_owned(),
            expected_type,
            json,
        }
    }
}

pub type StorageResult<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use crate::storage::Error;
    #[test]
    fn test_error_display() {
        let e = Error::gcs_unexpected_response_error("url", "value");
        let actual = format!("{}", e);

        assert_eq!(
            "GcsUnexpectedResponse { url: \"url\", value: \"value\" }",
            actual
        );
    }
}
