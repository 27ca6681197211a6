use std::path::PathBuf;

use gcs_bucket_manager::{
    cli::{self, Operation, DEVSTORAGE_FULL_CONTROL},
    storage::{credentials::serviceaccount, BucketClient},
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "gcs-bucket-manager",
    about = "create, delete and list gcs buckets with a service account"
)]
struct Opt {
    /// Service account email address
    #[structopt()]
    email: String,

    /// Path to the service account private key PEM file (without a password)
    #[structopt()]
    key_file: PathBuf,

    /// Command to perform: "create", "delete" or "list"
    #[structopt()]
    command: String,

    /// Command parameters: create <projectName> <bucketName>,
    /// delete <bucketName>, list <projectName>
    #[structopt()]
    params: Vec<String>,
}

#[tokio::main]
async fn main() {
    let opt = Opt::from_args();

    // Validation happens before any credential is read or client built, so
    // there is nothing to release on this path.
    let operation = match Operation::parse(&opt.command, &opt.params) {
        Ok(operation) => operation,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let credentials =
        match serviceaccount::from_pem_file(&opt.email, &opt.key_file, DEVSTORAGE_FULL_CONTROL)
            .await
        {
            Ok(credentials) => credentials,
            Err(e) => {
                eprintln!(
                    "Cannot open service account private key PEM file: {}\n{}",
                    opt.key_file.display(),
                    e
                );
                std::process::exit(1);
            }
        };

    let client = match BucketClient::new(Box::new(credentials)).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Authenticating service account {} failed.\n{}", opt.email, e);
            std::process::exit(1);
        }
    };

    let code = cli::run(
        &client,
        &operation,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await;
    std::process::exit(code);
}
