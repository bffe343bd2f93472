//! Error Kind
//!
//! HTTP-facing classification of [`AppError`](super::app_error::AppError).

use std::fmt;

/// エラー分類
///
/// レスポンスのステータスコードはこの分類だけで決まる。
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
/// assert!(ErrorKind::InternalServerError.is_server_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 入力不正・重複など、クライアントが直せるもの
    BadRequest,
    /// 認証情報なし・不正
    Unauthorized,
    NotFound,
    /// 詳細はログのみ。クライアントには汎用メッセージを返す
    InternalServerError,
}

impl ErrorKind {
    pub const fn status_code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::InternalServerError => 500,
        }
    }

    /// 理由フレーズ
    pub const fn reason(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::NotFound => "Not Found",
            Self::InternalServerError => "Internal Server Error",
        }
    }

    pub const fn is_server_error(self) -> bool {
        self.status_code() >= 500
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}
