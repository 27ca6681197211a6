use futures::{Stream, StreamExt, TryStreamExt};

use crate::oauth2::token::TokenGenerator;

use super::{
    client::StorageClient,
    resources::bucket::{bucket_url, buckets_url, Buckets, BucketsListRequest},
    Bucket, BucketTemplate, Error, StorageResult,
};

pub struct BucketClient {
    storage_client: StorageClient,
}

impl BucketClient {
    pub async fn new(token_generator: Box<dyn TokenGenerator>) -> StorageResult<Self> {
        Ok(Self {
            storage_client: StorageClient::new(token_generator).await?,
        })
    }

    /// `<https://cloud.google.com/storage/docs/json_api/v1/buckets/insert>`
    pub async fn insert(&self, project: &str, template: &BucketTemplate) -> StorageResult<Bucket> {
        if template.name.is_empty() {
            return Err(Error::GcsInvalidBucketName);
        }
        let url = buckets_url();
        self.storage_client
            .post_as_json(url.as_str(), &[("project", project)], template)
            .await
    }

    /// `<https://cloud.google.com/storage/docs/json_api/v1/buckets/delete>`
    pub async fn delete(&self, bucket_name: &str) -> StorageResult<()> {
        if bucket_name.is_empty() {
            return Err(Error::GcsInvalidBucketName);
        }
        let url = bucket_url(bucket_name);
        self.storage_client.delete(&url).await
    }

    /// Lists all buckets of a project, following `nextPageToken` until the
    /// listing is exhausted. Service order is preserved.
    pub async fn list(&self, project: &str) -> impl Stream<Item = StorageResult<Bucket>> + '_ {
        let buckets_list_request = BucketsListRequest {
            project: project.to_owned(),
            ..Default::default()
        };
        let url = buckets_url();
        futures::stream::try_unfold(
            (Some(buckets_list_request), url),
            move |(state, url)| async move {
                match state {
                    None => Ok(None),
                    Some(state) => {
                        let buckets: Buckets =
                            self.storage_client.get_as_json(&url, &state).await?;
                        let items = futures::stream::iter(buckets.items).map(Ok);
                        match buckets.next_page_token {
                            None => Ok(Some((items, (None, url)))),
                            Some(next_token) => {
                                let new_state = BucketsListRequest {
                                    page_token: Some(next_token),
                                    ..state
                                };
                                Ok(Some((items, (Some(new_state), url))))
                            }
                        }
                    }
                }
            },
        )
        .try_flatten()
    }
}
