//! Manage Google Cloud Storage buckets with a service account
//!
//! - native: talks to the [GCS JSON API](https://cloud.google.com/storage/docs/json_api) directly, no gcloud components needed
//! - auth: service account email address + private key PEM file, exchanged for an access token signed locally
//! - operations: create a bucket, delete a bucket, list the buckets of a project
//!
//! # Quick Start
//! ```rust,no_run
//! use gcs_bucket_manager::storage::{credentials::serviceaccount, BucketClient, BucketTemplate};
//!
//! #[tokio::main]
//! async fn main() {
//!     let scope = "https://www.googleapis.com/auth/devstorage.full_control";
//!     let credentials = serviceaccount::from_pem_file(
//!         "somecrypticname@developer.gserviceaccount.com",
//!         "/home/planetnik/certificate/gcp-oss.pem",
//!         scope,
//!     )
//!     .await
//!     .unwrap();
//!
//!     let client = BucketClient::new(Box::new(credentials)).await.unwrap();
//!
//!     let bucket = client
//!         .insert("myprojectname", &BucketTemplate::new("planetnikbucketname"))
//!         .await
//!         .unwrap();
//!     println!("created {}", bucket);
//! }
//! ```
pub mod cli;
mod gcp;

pub use gcp::manage;
pub use gcp::oauth2;
pub use gcp::{storage, Client};
