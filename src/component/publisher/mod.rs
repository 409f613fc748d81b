//! Bluesky 發佈元件
//!
//! 登入、上傳圖片、建立附圖貼文

mod bluesky;
mod types;

pub use bluesky::BlueskyClient;
pub use types::{BlobRef, PostDraft, PostRef, Session};
