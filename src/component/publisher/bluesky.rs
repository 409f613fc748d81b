use super::types::{
    BlobRef, CreateRecordRequest, CreateSessionRequest, EmbeddedImage, ImagesEmbed, PostDraft,
    PostRecord, PostRef, Session, UploadBlobResponse, XrpcError,
};
use crate::component::frame_poster::SocialPublisher;
use crate::config::Credentials;
use anyhow::{Context, Result, bail};
use chrono::{SecondsFormat, Utc};
use log::{debug, info};
use serde::de::DeserializeOwned;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const IO_TIMEOUT: Duration = Duration::from_secs(120);

const CREATE_SESSION: &str = "com.atproto.server.createSession";
const UPLOAD_BLOB: &str = "com.atproto.repo.uploadBlob";
const CREATE_RECORD: &str = "com.atproto.repo.createRecord";

const POST_COLLECTION: &str = "app.bsky.feed.post";
const IMAGES_EMBED: &str = "app.bsky.embed.images";

/// Bluesky（AT Protocol）XRPC 用戶端
#[derive(Debug, Clone)]
pub struct BlueskyClient {
    agent: ureq::Agent,
    service_url: String,
}

impl BlueskyClient {
    #[must_use]
    pub fn new(service_url: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(IO_TIMEOUT)
            .timeout_write(IO_TIMEOUT)
            .build();

        Self {
            agent,
            service_url: service_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/xrpc/{method}", self.service_url)
    }

    fn post_json<T: DeserializeOwned>(
        &self,
        method: &str,
        bearer: Option<&str>,
        body: &impl serde::Serialize,
    ) -> Result<T> {
        let payload = serde_json::to_string(body)
            .with_context(|| format!("Failed to serialize {method} request"))?;

        let mut request = self
            .agent
            .post(&self.endpoint(method))
            .set("Content-Type", "application/json");
        if let Some(token) = bearer {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }

        let body = read_response(method, request.send_string(&payload))?;
        serde_json::from_str(&body).with_context(|| format!("Unexpected {method} response"))
    }
}

impl SocialPublisher for BlueskyClient {
    fn login(&self, credentials: &Credentials) -> Result<Session> {
        let session: Session = self.post_json(
            CREATE_SESSION,
            None,
            &CreateSessionRequest {
                identifier: &credentials.identifier,
                password: &credentials.password,
            },
        )?;
        info!("Logged in as {} ({})", session.handle, session.did);
        Ok(session)
    }

    fn upload_image(&self, session: &Session, bytes: Vec<u8>) -> Result<BlobRef> {
        debug!("Uploading {} bytes", bytes.len());
        let response = self
            .agent
            .post(&self.endpoint(UPLOAD_BLOB))
            .set("Content-Type", "image/jpeg")
            .set("Authorization", &format!("Bearer {}", session.access_jwt))
            .send_bytes(&bytes);

        let body = read_response(UPLOAD_BLOB, response)?;
        let uploaded: UploadBlobResponse = serde_json::from_str(&body)
            .with_context(|| format!("Unexpected {UPLOAD_BLOB} response"))?;
        info!("Image uploaded: {}", uploaded.blob.0);
        Ok(uploaded.blob)
    }

    fn create_post(&self, session: &Session, draft: &PostDraft) -> Result<PostRef> {
        let request = CreateRecordRequest {
            repo: &session.did,
            collection: POST_COLLECTION,
            record: PostRecord {
                record_type: POST_COLLECTION,
                text: &draft.text,
                created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                embed: ImagesEmbed {
                    embed_type: IMAGES_EMBED,
                    images: vec![EmbeddedImage {
                        image: &draft.image,
                        alt: &draft.alt,
                    }],
                },
            },
        };

        let post: PostRef = self.post_json(CREATE_RECORD, Some(&session.access_jwt), &request)?;
        info!("Post created successfully: {}", post.uri);
        Ok(post)
    }
}

/// 讀取回應內容；非 2xx 時帶出 XRPC 的 `error` 與 `message`
fn read_response(method: &str, result: Result<ureq::Response, ureq::Error>) -> Result<String> {
    match result {
        Ok(response) => response
            .into_string()
            .with_context(|| format!("Failed to read {method} response")),
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            let xrpc: XrpcError = serde_json::from_str(&body).unwrap_or_default();
            match (xrpc.error, xrpc.message) {
                (Some(error), Some(message)) => {
                    bail!("{method} failed with HTTP {status}: {error}: {message}")
                }
                (Some(detail), None) | (None, Some(detail)) => {
                    bail!("{method} failed with HTTP {status}: {detail}")
                }
                (None, None) => {
                    let truncated = body.trim().chars().take(240).collect::<String>();
                    bail!("{method} failed with HTTP {status} ({truncated})")
                }
            }
        }
        Err(ureq::Error::Transport(err)) => bail!("{method} transport error: {err}"),
    }
}
