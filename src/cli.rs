//! Positional argument validation and command dispatch for the
//! `gcs-bucket-manager` binary.

use std::fmt::Display;
use std::io::Write;

use crate::manage::BucketApi;
use crate::storage::BucketTemplate;

/// OAuth2 scope granting full control over buckets and objects.
pub const DEVSTORAGE_FULL_CONTROL: &str =
    "https://www.googleapis.com/auth/devstorage.full_control";

#[derive(Debug, PartialEq, Eq)]
pub enum Operation {
    Create {
        project_name: String,
        bucket_name: String,
    },
    Delete {
        bucket_name: String,
    },
    List {
        project_name: String,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub struct UsageError(String);

impl Display for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl UsageError {
    fn new(message: &str) -> Self {
        Self(message.to_owned())
    }
}

impl Operation {
    /// Validates the command-dependent tail of the argument list.
    ///
    /// `create` takes two parameters and ignores extras, `delete` and `list`
    /// take exactly one.
    pub fn parse(command: &str, params: &[String]) -> Result<Self, UsageError> {
        match command {
            "create" => match params {
                [project_name, bucket_name, ..] => Ok(Operation::Create {
                    project_name: project_name.to_owned(),
                    bucket_name: bucket_name.to_owned(),
                }),
                _ => Err(UsageError::new(
                    "Command 'create' require two additional parameters (projectName, bucketName).",
                )),
            },
            "delete" => match params {
                [bucket_name] => Ok(Operation::Delete {
                    bucket_name: bucket_name.to_owned(),
                }),
                _ => Err(UsageError::new(
                    "Command 'delete' require only one additional parameter (bucketName).",
                )),
            },
            "list" => match params {
                [project_name] => Ok(Operation::List {
                    project_name: project_name.to_owned(),
                }),
                _ => Err(UsageError::new(
                    "Command 'list' require only one additional parameter (projectName).",
                )),
            },
            unknown => Err(UsageError(format!("Unknown command: {}", unknown))),
        }
    }
}

/// Runs one operation against the storage backend and releases it exactly
/// once, whichever way the operation went. Returns the process exit code.
pub async fn run(
    api: &dyn BucketApi,
    operation: &Operation,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    let code = dispatch(api, operation, out, err).await;
    match api.release().await {
        Ok(()) => code,
        Err(e) => {
            let _ = writeln!(err, "Releasing storage client failed.\n{}", e);
            if code == 0 {
                1
            } else {
                code
            }
        }
    }
}

async fn dispatch(
    api: &dyn BucketApi,
    operation: &Operation,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    match operation {
        Operation::Create {
            project_name,
            bucket_name,
        } => match api
            .create_bucket(project_name, &BucketTemplate::new(bucket_name))
            .await
        {
            Ok(bucket) => {
                let _ = writeln!(
                    out,
                    "Bucket {} successfully created in project {} .",
                    bucket.name, project_name
                );
                0
            }
            Err(e) => {
                let _ = writeln!(err, "Creating bucket {} failed.\n{}", bucket_name, e);
                1
            }
        },
        Operation::Delete { bucket_name } => match api.delete_bucket(bucket_name).await {
            Ok(()) => {
                let _ = writeln!(out, "Bucket {} successfully deleted.", bucket_name);
                0
            }
            Err(e) => {
                let _ = writeln!(err, "Deleting bucket {} failed.\n{}", bucket_name, e);
                1
            }
        },
        Operation::List { project_name } => match api.list_buckets(project_name).await {
            Ok(buckets) => {
                let _ = writeln!(out, "List of buckets for project {}:", project_name);
                for bucket in buckets {
                    let _ = writeln!(out, "* {}", bucket.name);
                }
                0
            }
            Err(e) => {
                let _ = writeln!(err, "Listing buckets for project {} failed.\n{}", project_name, e);
                1
            }
        },
    }
}
