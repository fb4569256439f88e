use secrecy::Secret;

/// Spotifyトークン構造体
///
/// アクセストークンとリフレッシュトークンは、ログに出力されないように秘匿する。
#[derive(Debug, Clone)]
pub struct SpotifyToken {
    /// アクセストークン
    pub access_token: Secret<String>,
    /// トークンの種類
    pub token_type: String,
    /// 有効期間を示す秒数
    pub expires_in: i64,
    /// リフレッシュトークン
    pub refresh_token: Secret<String>,
    /// 認可されたスコープ（空白区切り）
    pub scope: String,
    /// 有効期限
    ///
    /// 単位が定まっていないため、整数のまま保持する。
    pub expires_at: i64,
}
