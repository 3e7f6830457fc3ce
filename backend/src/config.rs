//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 주소 (필수)
//! - `UPLOADS_PATH`: 업로드 이미지 저장 디렉토리
//! - `PUBLIC_BASE_URL`: 업로드 이미지의 공개 URL 접두사
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `MAX_BODY_BYTES`: 기사 요청 본문 최대 크기 (base64 이미지 포함)

use std::env;

/// 기사 요청 본문 기본 최대 크기: 16 MiB
///
/// 이미지는 base64로 JSON 본문에 실려 오며 원본보다 약 4/3배 커집니다.
/// 16 MiB 본문이면 약 12 MiB짜리 사진까지 받을 수 있습니다.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 주소 (예: "sqlite:data/articles.db")
    pub database_url: String,
    /// 업로드 이미지가 저장되는 디렉토리 경로
    pub uploads_path: String,
    /// 업로드 이미지 URL 접두사 (예: "https://cdn.example.com/uploads")
    /// 오브젝트 키가 뒤에 붙어 최종 공개 URL이 됩니다.
    pub public_base_url: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
    /// `/articles` 요청 본문 최대 바이트 수 (기본값: 16 MiB)
    pub max_body_bytes: usize,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000); // 파싱 실패 시 기본값

        Ok(Self {
            database_url: env::var("DATABASE_URL")?, // 필수: 없으면 에러
            uploads_path: env::var("UPLOADS_PATH")
                .unwrap_or_else(|_| "data/uploads".to_string()),
            // 기본값은 이 서버가 직접 서빙하는 /uploads 경로입니다.
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{port}/uploads")),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_BODY_BYTES), // 없거나 파싱 실패 시 기본값
        })
    }
}
