//! # 기사/북마크 API 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. 업로드 디렉토리 생성
//! 6. API 라우터 설정
//! 7. HTTP 서버 시작

// ── 모듈 선언 ──
mod config; // 환경변수 설정
mod db; // 데이터베이스 쿼리 함수
mod error; // 에러 타입 정의
mod models; // 데이터 구조체
mod routes; // HTTP 라우트 핸들러
mod services; // 이미지 업로드 / 오브젝트 저장소

// ── 외부 크레이트 임포트 ──
use anyhow::Result; // main()의 에러 타입 (어떤 에러든 담을 수 있음)
use axum::Router; // URL 경로 → 핸들러 매핑
use config::Config;
use routes::AppState; // 핸들러가 공유하는 상태 (DB 풀, 저장소)
use services::LocalObjectStore; // 디스크 디렉토리 오브젝트 저장소
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions}; // SQLite 연결 옵션 / 풀 설정
use std::{str::FromStr, sync::Arc};
use tower_http::{services::ServeDir, trace::TraceLayer}; // 정적 파일 서빙, 요청 로깅
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // 로깅 구독자 조립

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 이 크레이트, tower_http, axum을 debug 레벨로 출력합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "articles_api=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting articles API on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 ──
    // create_if_missing: DB 파일이 없으면 새로 만듭니다.
    // 요청 하나가 커넥션 하나를 빌려 쓰고, 응답 후 풀에 돌려줍니다.
    let connect_options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    // ── 5단계: 데이터베이스 마이그레이션 실행 ──
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    // ── 6단계: 업로드 디렉토리 생성 ──
    tokio::fs::create_dir_all(&config.uploads_path).await?;
    tracing::info!(
        uploads_path = %config.uploads_path,
        public_base_url = %config.public_base_url,
        max_body_bytes = config.max_body_bytes,
        "Image uploads enabled"
    );

    // ── 7단계: 애플리케이션 상태(State) 생성 ──
    let state = AppState {
        pool,
        storage: Arc::new(LocalObjectStore::new(
            &config.uploads_path,
            &config.public_base_url,
        )),
        max_body_bytes: config.max_body_bytes,
    };

    // ── 8단계: 라우터 설정 ──
    // - /api/v1/...: 기사, 북마크, 헬스체크 API
    // - /uploads/...: 업로드된 이미지 정적 서빙 (공개 URL이 이 경로를 가리킴)
    let app = Router::new()
        .nest("/api/v1", routes::router(state))
        .nest_service("/uploads", ServeDir::new(&config.uploads_path))
        .layer(TraceLayer::new_for_http());

    // ── 9단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
