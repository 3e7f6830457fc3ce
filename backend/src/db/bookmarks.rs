//! # 북마크 데이터베이스 쿼리 모듈
//!
//! `bookmarks` 테이블: 사용자와 기사의 다대다(N:M) 관계 테이블
//!
//! ```sql
//! articles ←── bookmarks (user_id, article_id) ──→ (외부 인증 서비스의 사용자)
//! ```

use crate::error::AppError;
use crate::models::BookmarkOutcome;
use sqlx::SqliteConnection;

/// 사용자가 북마크한 기사 ID 목록을 오래된 북마크부터 조회합니다.
pub async fn list_bookmarked_article_ids(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<i64>, AppError> {
    // query_as에 튜플 타입을 쓰면 단일 컬럼 결과도 바로 받을 수 있습니다.
    let rows: Vec<(i64,)> = sqlx::query_as(
        "SELECT article_id FROM bookmarks WHERE user_id = ? ORDER BY created_at, article_id",
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// 북마크를 추가합니다.
///
/// `INSERT OR IGNORE`: (user_id, article_id) 복합 PRIMARY KEY에 걸리는 중복 행은
/// 에러 없이 무시됩니다. 영향받은 행 수로 새로 추가됐는지를 구분합니다.
///
/// 외래 키(FOREIGN KEY) 위반은 `OR IGNORE` 대상이 아니므로 그대로 에러가 나고,
/// 없는 기사를 북마크하려는 경우로 보고 404로 바꿉니다.
pub async fn add_bookmark(
    conn: &mut SqliteConnection,
    user_id: i64,
    article_id: i64,
) -> Result<BookmarkOutcome, AppError> {
    let result = sqlx::query("INSERT OR IGNORE INTO bookmarks (user_id, article_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(article_id)
        .execute(&mut *conn)
        .await;

    match result {
        Ok(done) if done.rows_affected() > 0 => Ok(BookmarkOutcome::Created),
        Ok(_) => Ok(BookmarkOutcome::AlreadyExists),
        Err(sqlx::Error::Database(err)) if err.is_foreign_key_violation() => {
            Err(AppError::article_not_found())
        }
        Err(err) => Err(err.into()),
    }
}

/// 북마크를 삭제합니다.
///
/// - `true`: 삭제됨
/// - `false`: 원래 없던 쌍 (핸들러는 이 경우도 성공으로 응답합니다)
pub async fn remove_bookmark(
    conn: &mut SqliteConnection,
    user_id: i64,
    article_id: i64,
) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM bookmarks WHERE user_id = ? AND article_id = ?")
        .bind(user_id)
        .bind(article_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_article, delete_article, test_pool};
    use crate::models::NewArticle;

    async fn seed_article(conn: &mut SqliteConnection, title: &str) -> i64 {
        let article = NewArticle {
            title: title.to_string(),
            content: "body".to_string(),
            category: "general".to_string(),
            tags: Vec::new(),
            image_url: None,
        };
        create_article(conn, &article).await.unwrap().id
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let article_id = seed_article(&mut conn, "a").await;

        assert_eq!(
            add_bookmark(&mut conn, 7, article_id).await.unwrap(),
            BookmarkOutcome::Created
        );
        assert_eq!(
            add_bookmark(&mut conn, 7, article_id).await.unwrap(),
            BookmarkOutcome::AlreadyExists
        );
        assert_eq!(
            list_bookmarked_article_ids(&mut conn, 7).await.unwrap(),
            vec![article_id]
        );
    }

    #[tokio::test]
    async fn test_add_unknown_article_is_not_found() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let err = add_bookmark(&mut conn, 1, 404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_user() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let first = seed_article(&mut conn, "a").await;
        let second = seed_article(&mut conn, "b").await;

        add_bookmark(&mut conn, 1, second).await.unwrap();
        add_bookmark(&mut conn, 1, first).await.unwrap();
        add_bookmark(&mut conn, 2, first).await.unwrap();

        let ids = list_bookmarked_article_ids(&mut conn, 1).await.unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&first) && ids.contains(&second));
        assert_eq!(list_bookmarked_article_ids(&mut conn, 2).await.unwrap(), vec![first]);
        assert!(list_bookmarked_article_ids(&mut conn, 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_reports_whether_row_existed() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let article_id = seed_article(&mut conn, "a").await;

        add_bookmark(&mut conn, 1, article_id).await.unwrap();
        assert!(remove_bookmark(&mut conn, 1, article_id).await.unwrap());
        assert!(!remove_bookmark(&mut conn, 1, article_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_deleting_article_cascades_to_bookmarks() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let article_id = seed_article(&mut conn, "a").await;

        add_bookmark(&mut conn, 1, article_id).await.unwrap();
        delete_article(&mut conn, article_id).await.unwrap();
        assert!(list_bookmarked_article_ids(&mut conn, 1).await.unwrap().is_empty());
    }
}
