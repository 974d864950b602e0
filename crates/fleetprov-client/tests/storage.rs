//! Integration tests for the S3 storage client against a mock endpoint.

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use fleetprov_client::StorageClient;
use fleetprov_core::ObjectStore;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> StorageClient {
    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("eu-central-1"))
        .credentials_provider(Credentials::new("test", "test", None, None, "test"))
        .endpoint_url(server.uri())
        .force_path_style(true)
        .build();
    StorageClient::new(aws_sdk_s3::Client::from_conf(config), "eu-central-1")
}

#[tokio::test]
async fn list_buckets_parses_names() {
    let server = MockServer::start().await;

    let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListAllMyBucketsResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Owner><ID>0</ID><DisplayName>owner</DisplayName></Owner>
  <Buckets>
    <Bucket><Name>fleet-staging</Name><CreationDate>2024-01-01T00:00:00.000Z</CreationDate></Bucket>
    <Bucket><Name>telemetry</Name><CreationDate>2024-01-01T00:00:00.000Z</CreationDate></Bucket>
  </Buckets>
</ListAllMyBucketsResult>"#;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/xml"))
        .mount(&server)
        .await;

    let client = client(&server);
    let buckets = client.list_buckets().await.unwrap();
    assert_eq!(buckets, vec!["fleet-staging", "telemetry"]);
}

#[tokio::test]
async fn list_objects_follows_continuation_tokens() {
    let server = MockServer::start().await;

    let first = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Name>fleet-staging</Name>
  <KeyCount>1</KeyCount>
  <IsTruncated>true</IsTruncated>
  <NextContinuationToken>token-2</NextContinuationToken>
  <Contents><Key>provisioning-data.json</Key><Size>64</Size></Contents>
</ListBucketResult>"#;

    let second = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Name>fleet-staging</Name>
  <KeyCount>1</KeyCount>
  <IsTruncated>false</IsTruncated>
  <Contents><Key>stale.json</Key><Size>12</Size></Contents>
</ListBucketResult>"#;

    Mock::given(method("GET"))
        .and(path("/fleet-staging"))
        .and(query_param("continuation-token", "token-2"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(second, "application/xml"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fleet-staging"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(first, "application/xml"))
        .mount(&server)
        .await;

    let client = client(&server);
    let keys = client.list_objects("fleet-staging").await.unwrap();
    assert_eq!(keys, vec!["provisioning-data.json", "stale.json"]);
}

#[tokio::test]
async fn put_object_targets_bucket_and_key() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/fleet-staging/provisioning-data.json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client
        .put_object("fleet-staging", "provisioning-data.json", b"{}\n".to_vec())
        .await
        .unwrap();
}

#[tokio::test]
async fn bucket_lifecycle_calls_succeed() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/fleet-staging"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/fleet-staging"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/fleet-staging/stale.json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client.create_bucket("fleet-staging").await.unwrap();
    client.delete_object("fleet-staging", "stale.json").await.unwrap();
    client.delete_bucket("fleet-staging").await.unwrap();
}
