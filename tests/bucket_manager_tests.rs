use std::sync::atomic::{AtomicUsize, Ordering};

use gcs_bucket_manager::{
    cli::{self, Operation},
    manage::BucketApi,
    storage::{Bucket, BucketTemplate, Error, StorageResult},
};

/// In-memory stand-in for the storage backend, recording release calls.
struct FakeApi {
    buckets: Vec<String>,
    fail_operation_with: Option<String>,
    fail_release: bool,
    release_count: AtomicUsize,
}

impl FakeApi {
    fn ok(buckets: &[&str]) -> Self {
        Self {
            buckets: buckets.iter().map(|b| (*b).to_owned()).collect(),
            fail_operation_with: None,
            fail_release: false,
            release_count: AtomicUsize::new(0),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            fail_operation_with: Some(message.to_owned()),
            ..Self::ok(&[])
        }
    }

    fn with_failing_release(mut self) -> Self {
        self.fail_release = true;
        self
    }

    fn release_count(&self) -> usize {
        self.release_count.load(Ordering::SeqCst)
    }

    fn operation_result<T>(&self, value: T) -> StorageResult<T> {
        match &self.fail_operation_with {
            None => Ok(value),
            Some(message) => Err(Error::GcsUnexpectedResponse {
                url: "https://storage.googleapis.com/storage/v1/b".to_owned(),
                value: message.to_owned(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl BucketApi for FakeApi {
    async fn create_bucket(
        &self,
        _project_name: &str,
        template: &BucketTemplate,
    ) -> StorageResult<Bucket> {
        self.operation_result(Bucket {
            name: template.name.to_owned(),
            ..Default::default()
        })
    }

    async fn delete_bucket(&self, _bucket_name: &str) -> StorageResult<()> {
        self.operation_result(())
    }

    async fn list_buckets(&self, _project_name: &str) -> StorageResult<Vec<Bucket>> {
        self.operation_result(
            self.buckets
                .iter()
                .map(|name| Bucket {
                    name: name.to_owned(),
                    ..Default::default()
                })
                .collect(),
        )
    }

    async fn release(&self) -> StorageResult<()> {
        self.release_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_release {
            Err(Error::GcsUnexpectedResponse {
                url: "release".to_owned(),
                value: "connection pool teardown failed".to_owned(),
            })
        } else {
            Ok(())
        }
    }
}

async fn run(api: &FakeApi, operation: Operation) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = cli::run(api, &operation, &mut out, &mut err).await;
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn create_mybucket() -> Operation {
    Operation::Create {
        project_name: "myproj".to_owned(),
        bucket_name: "mybucket".to_owned(),
    }
}

#[tokio::test]
async fn test_create_bucket_success() {
    let api = FakeApi::ok(&[]);
    let (code, out, err) = run(&api, create_mybucket()).await;

    assert_eq!(0, code);
    assert_eq!(
        "Bucket mybucket successfully created in project myproj .\n",
        out
    );
    assert_eq!("", err);
    assert_eq!(1, api.release_count());
}

#[tokio::test]
async fn test_create_bucket_failure() {
    let api = FakeApi::failing("quota exceeded");
    let (code, out, err) = run(&api, create_mybucket()).await;

    assert_eq!(1, code);
    assert_eq!("", out);
    assert!(
        err.contains("Creating bucket mybucket failed."),
        "unexpected stderr: {}",
        err
    );
    assert!(err.contains("quota exceeded"), "unexpected stderr: {}", err);
    assert_eq!(1, api.release_count());
}

#[tokio::test]
async fn test_delete_bucket_success() {
    let api = FakeApi::ok(&[]);
    let (code, out, err) = run(
        &api,
        Operation::Delete {
            bucket_name: "mybucket".to_owned(),
        },
    )
    .await;

    assert_eq!(0, code);
    assert_eq!("Bucket mybucket successfully deleted.\n", out);
    assert_eq!("", err);
    assert_eq!(1, api.release_count());
}

#[tokio::test]
async fn test_delete_bucket_failure() {
    let api = FakeApi::failing("permission denied");
    let (code, out, err) = run(
        &api,
        Operation::Delete {
            bucket_name: "mybucket".to_owned(),
        },
    )
    .await;

    assert_eq!(1, code);
    assert_eq!("", out);
    assert!(
        err.contains("Deleting bucket mybucket failed."),
        "unexpected stderr: {}",
        err
    );
    assert!(
        err.contains("permission denied"),
        "unexpected stderr: {}",
        err
    );
    assert_eq!(1, api.release_count());
}

#[tokio::test]
async fn test_list_buckets_preserves_order() {
    let api = FakeApi::ok(&["a", "b"]);
    let (code, out, err) = run(
        &api,
        Operation::List {
            project_name: "myproj".to_owned(),
        },
    )
    .await;

    assert_eq!(0, code);
    assert_eq!("List of buckets for project myproj:\n* a\n* b\n", out);
    assert_eq!("", err);
    assert_eq!(1, api.release_count());
}

#[tokio::test]
async fn test_list_buckets_failure_is_reported() {
    let api = FakeApi::failing("backend unavailable");
    let (code, out, err) = run(
        &api,
        Operation::List {
            project_name: "myproj".to_owned(),
        },
    )
    .await;

    assert_eq!(1, code);
    assert_eq!("", out, "a failed listing should not write the header");
    assert!(
        err.contains("Listing buckets for project myproj failed."),
        "unexpected stderr: {}",
        err
    );
    assert!(
        err.contains("backend unavailable"),
        "unexpected stderr: {}",
        err
    );
    assert_eq!(1, api.release_count());
}

#[tokio::test]
async fn test_release_failure_turns_success_into_failure() {
    let api = FakeApi::ok(&[]).with_failing_release();
    let (code, out, err) = run(&api, create_mybucket()).await;

    assert_eq!(1, code);
    assert_eq!(
        "Bucket mybucket successfully created in project myproj .\n",
        out
    );
    assert!(
        err.contains("Releasing storage client failed."),
        "unexpected stderr: {}",
        err
    );
    assert_eq!(1, api.release_count());
}

#[tokio::test]
async fn test_release_happens_once_even_when_operation_fails() {
    let api = FakeApi::failing("quota exceeded").with_failing_release();
    let (code, _out, err) = run(&api, create_mybucket()).await;

    assert_eq!(1, code);
    assert!(err.contains("Creating bucket mybucket failed."));
    assert!(err.contains("Releasing storage client failed."));
    assert_eq!(1, api.release_count());
}
