//! # 이미지 업로드 / 오브젝트 저장소 서비스
//!
//! 기사에 첨부되는 이미지를 저장하고 공개 URL을 돌려주는 기능을 제공합니다.
//!
//! 이 모듈의 구성:
//! - `ObjectStore`: "키 + 바이트 → 공개 URL" 한 가지 동작만 가진 저장소 트레이트
//! - `LocalObjectStore`: 디스크 디렉토리에 저장하는 구현체 (서버가 `/uploads`로 서빙)
//! - `upload_image()`: base64 디코딩 → 키 생성 → 저장을 묶은 핸들러용 함수
//!
//! 저장소를 트레이트로 둔 이유는 AppState에 `Arc<dyn ObjectStore>`로 넣어
//! 테스트와 실제 서버가 서로 다른 디렉토리/URL을 쓸 수 있게 하기 위해서입니다.

use crate::error::AppError;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::PathBuf;
use tokio::fs;

/// 업로드 파일 이름이 없을 때 쓰는 기본값
pub const DEFAULT_FILENAME: &str = "image.jpg";

/// 오브젝트 키 접두사. 최종 키는 `articles/<uuid>_<파일이름>` 입니다.
const KEY_PREFIX: &str = "articles";

/// 오브젝트 저장소 트레이트
///
/// `#[async_trait]`: 트레이트 객체(`dyn ObjectStore`)에서도 async 메서드를 호출할 수 있게
/// 반환 타입을 `Pin<Box<dyn Future>>`로 바꿔주는 매크로입니다.
/// `Send + Sync`: 여러 요청(스레드)이 Arc로 공유하기 위해 필요합니다.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// 객체를 저장하고 공개 URL을 반환합니다.
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError>;
}

/// 로컬 디렉토리 기반 오브젝트 저장소
///
/// `root/<key>` 경로에 파일을 쓰고, `public_base_url/<key>`를 URL로 돌려줍니다.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        // 키는 object_key()가 만든 값만 들어오지만, 디렉토리 밖으로 나가는 경로는 한 번 더 막습니다.
        if key.split('/').any(|part| part.is_empty() || part == "." || part == "..") {
            return Err(AppError::Internal(format!("Invalid object key: {key}")));
        }

        let full_path = self.root.join(key);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&full_path, &body).await?;

        tracing::debug!(key, content_type, bytes = body.len(), "Stored object");

        Ok(format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            key
        ))
    }
}

/// base64 이미지를 디코딩해 저장소에 올리고 공개 URL을 반환합니다.
///
/// # 매개변수
/// - `data`: base64 문자열 또는 `data:<mime>;base64,<데이터>` 형태의 data URL
/// - `filename`: 원본 파일 이름 (없으면 "image.jpg")
///
/// # 에러
/// - 잘못된 base64 → `AppError::BadRequest` (400)
/// - 저장 실패 → 저장소 구현이 돌려준 에러 (500)
pub async fn upload_image(
    store: &dyn ObjectStore,
    data: &str,
    filename: Option<&str>,
) -> Result<String, AppError> {
    let bytes = decode_image(data)?;
    let filename = sanitize_filename(filename.unwrap_or(DEFAULT_FILENAME));
    let key = object_key(&filename);
    let content_type = content_type_for(&filename);

    store.put_object(&key, bytes, content_type).await
}

/// base64 이미지 데이터를 바이트로 디코딩합니다.
///
/// data URL 접두사(`data:image/png;base64,`)가 있으면 떼어내고,
/// 줄바꿈 등 공백 문자는 무시합니다.
pub fn decode_image(data: &str) -> Result<Vec<u8>, AppError> {
    let payload = match data.strip_prefix("data:") {
        Some(rest) => rest
            .split_once(";base64,")
            .map(|(_, encoded)| encoded)
            .ok_or_else(|| AppError::BadRequest("Image data URL must be base64".to_string()))?,
        None => data,
    };

    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(cleaned)?;
    if bytes.is_empty() {
        return Err(AppError::BadRequest("Image data is empty".to_string()));
    }
    Ok(bytes)
}

/// 업로드 파일 이름을 저장소 키에 넣을 수 있는 형태로 정리합니다.
///
/// - 경로 구분자 앞부분은 버리고 마지막 이름만 사용
/// - 확장자를 뺀 부분은 `slug::slugify()`로 ASCII 소문자-하이픈 형태로 변환
/// - 확장자는 소문자 영숫자만 남김
///
/// 예: `"../../Фото Отчет.PNG"` → `"foto-otchet.png"`
pub fn sanitize_filename(filename: &str) -> String {
    let name = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    let (stem, extension) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };

    let mut stem = slug::slugify(stem);
    if stem.is_empty() {
        stem = "image".to_string();
    }

    let extension: Option<String> = extension
        .map(|ext| {
            ext.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|ext| !ext.is_empty());

    match extension {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

/// 고유한 오브젝트 키를 만듭니다: `articles/<UUIDv7>_<파일이름>`
pub fn object_key(filename: &str) -> String {
    format!("{KEY_PREFIX}/{}_{filename}", uuid::Uuid::now_v7())
}

/// 파일 확장자로 Content-Type을 추정합니다. 모르는 확장자는 JPEG로 취급합니다.
pub fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (PathBuf, LocalObjectStore) {
        let root = std::env::temp_dir().join(format!("articles-api-{}", uuid::Uuid::now_v7()));
        let store = LocalObjectStore::new(root.clone(), "http://cdn.test/uploads/");
        (root, store)
    }

    #[test]
    fn test_decode_plain_and_data_url() {
        assert_eq!(decode_image("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(
            decode_image("data:image/png;base64,aGVs\nbG8=").unwrap(),
            b"hello"
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_image("***"), Err(AppError::BadRequest(_))));
        assert!(matches!(
            decode_image("data:text/plain,hello"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Photo 1.JPG"), "photo-1.jpg");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\tmp\\scan.png"), "scan.png");
        assert_eq!(sanitize_filename(".png"), "png");
        assert_eq!(sanitize_filename("!!!.gif"), "image.gif");
        assert_eq!(sanitize_filename(""), "image");
    }

    #[test]
    fn test_object_key_shape() {
        let key = object_key("image.jpg");
        assert!(key.starts_with("articles/"));
        assert!(key.ends_with("_image.jpg"));
        assert_ne!(key, object_key("image.jpg"));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a.PNG"), "image/png");
        assert_eq!(content_type_for("a.webp"), "image/webp");
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("noext"), "image/jpeg");
    }

    #[tokio::test]
    async fn test_upload_writes_file_and_returns_public_url() {
        let (root, store) = temp_store();

        let url = upload_image(&store, "aGVsbG8=", Some("Cover.png")).await.unwrap();

        assert!(url.starts_with("http://cdn.test/uploads/articles/"));
        assert!(url.ends_with("_cover.png"));

        let key = url.trim_start_matches("http://cdn.test/uploads/");
        let stored = tokio::fs::read(root.join(key)).await.unwrap();
        assert_eq!(stored, b"hello");
    }

    #[tokio::test]
    async fn test_put_object_rejects_traversal() {
        let (_, store) = temp_store();
        let err = store
            .put_object("../escape.jpg", b"x".to_vec(), "image/jpeg")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
