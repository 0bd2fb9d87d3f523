//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// プロジェクト全体で使用する標準エラー型です。
///
/// ## Fields
/// * `kind` - エラーの分類（HTTP ステータスコードにマッピング）
/// * `message` - ユーザー向けのエラーメッセージ
/// * `source` - 元のエラー（オプション、デバッグ用）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::NotFound, "User not found");
/// assert_eq!(err.status_code(), 404);
/// ```
pub struct AppError {
    /// エラー種別
    kind: ErrorKind,
    /// ユーザー向けメッセージ
    message: Cow<'static, str>,
    /// 元のエラー（デバッグ用）
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// アプリケーション結果型エイリアス
///
/// `Result<T, AppError>` の省略形です。
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 新しいエラーを作成
    ///
    /// ## Arguments
    /// * `kind` - エラー種別
    /// * `message` - ユーザー向けメッセージ
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    // ========================================================================
    // Convenience constructors
    // ========================================================================

    /// 400 Bad Request エラー
    #[inline]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// 401 Unauthorized エラー
    #[inline]
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// 403 Forbidden エラー
    #[inline]
    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// 404 Not Found エラー
    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// 409 Conflict エラー
    #[inline]
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// 500 Internal Server Error
    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    /// 503 Service Unavailable エラー
    #[inline]
    pub fn service_unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// 元のエラーを設定（デバッグ用）
    ///
    /// ## Arguments
    /// * `source` - 元のエラー
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// エラー種別を取得
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP ステータスコードを取得
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// メッセージを取得
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// サーバーエラーかどうか
    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    /// クライアントエラーかどうか
    #[inline]
    pub fn is_client_error(&self) -> bool {
        self.kind.is_client_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::NotFound, "User not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "User not found");
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(AppError::bad_request("test").status_code(), 400);
        assert_eq!(AppError::unauthorized("test").status_code(), 401);
        assert_eq!(AppError::forbidden("test").status_code(), 403);
        assert_eq!(AppError::not_found("test").status_code(), 404);
        assert_eq!(AppError::conflict("test").status_code(), 409);
        assert_eq!(AppError::internal("test").status_code(), 500);
        assert_eq!(AppError::service_unavailable("test").status_code(), 503);
    }

    #[test]
    fn test_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = AppError::internal("Failed to read file").with_source(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display() {
        let err = AppError::not_found("User not found");
        assert_eq!(err.to_string(), "[Not Found] User not found");
    }

    #[test]
    fn test_is_server_error() {
        assert!(!AppError::not_found("test").is_server_error());
        assert!(AppError::internal("test").is_server_error());
    }
}
