use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// 已登入的工作階段
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_jwt: String,
    pub did: String,
    #[serde(default)]
    pub handle: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("did", &self.did)
            .field("handle", &self.handle)
            .field("access_jwt", &"<redacted>")
            .finish()
    }
}

/// 上傳後取得的 blob 參照，內容不解讀，原樣帶回貼文
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobRef(pub Value);

/// 建立完成的貼文
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostRef {
    pub uri: String,
    pub cid: String,
}

/// 待發佈的貼文內容
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub text: String,
    pub image: BlobRef,
    pub alt: String,
}

#[derive(Serialize)]
pub(crate) struct CreateSessionRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct UploadBlobResponse {
    pub blob: BlobRef,
}

#[derive(Serialize)]
pub(crate) struct CreateRecordRequest<'a> {
    pub repo: &'a str,
    pub collection: &'static str,
    pub record: PostRecord<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostRecord<'a> {
    #[serde(rename = "$type")]
    pub record_type: &'static str,
    pub text: &'a str,
    pub created_at: String,
    pub embed: ImagesEmbed<'a>,
}

#[derive(Serialize)]
pub(crate) struct ImagesEmbed<'a> {
    #[serde(rename = "$type")]
    pub embed_type: &'static str,
    pub images: Vec<EmbeddedImage<'a>>,
}

#[derive(Serialize)]
pub(crate) struct EmbeddedImage<'a> {
    pub image: &'a BlobRef,
    pub alt: &'a str,
}

/// XRPC 錯誤回應
#[derive(Debug, Default, Deserialize)]
pub(crate) struct XrpcError {
    pub error: Option<String>,
    pub message: Option<String>,
}
