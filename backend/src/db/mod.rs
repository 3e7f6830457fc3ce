//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `articles`: 기사 CRUD 쿼리
//! - `bookmarks`: 북마크 목록/추가/삭제 쿼리
//! - `sparse_update`: 부분 업데이트용 `UPDATE` 문 빌더

pub mod articles;
pub mod bookmarks;
pub mod sparse_update;

pub use articles::*;
pub use bookmarks::*;
pub use sparse_update::{ArticleField, SparseUpdate};

/// 현재 UTC 시각을 밀리초 단위 ISO-8601 문자열로 만드는 SQLite 식
/// (마이그레이션의 DEFAULT 값과 같은 형식)
pub(crate) const NOW_UTC: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

/// 테스트용 인메모리 SQLite 풀
///
/// `sqlite::memory:`는 커넥션마다 별도의 DB가 생기므로 커넥션을 1개로 고정하고,
/// 유휴 타임아웃으로 커넥션이 닫혀 DB가 사라지지 않도록 합니다.
#[cfg(test)]
pub async fn test_pool() -> sqlx::SqlitePool {
    use sqlx::sqlite::SqlitePoolOptions;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<std::time::Duration>)
        .max_lifetime(None::<std::time::Duration>)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    pool
}
