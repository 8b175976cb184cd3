use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Auth0Config;
use crate::error::{AppError, AppResult};

/// Auth0 访问令牌中我们关心的声明。
/// email / name 只有在令牌附带 profile 信息时才存在
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auth0Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct JwksResponse {
    keys: Vec<Jwk>,
}

/// JWKS 中的单个 RSA 公钥, 只保留验签所需字段
#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    kty: String,
    n: String,
    e: String,
    #[serde(rename = "use")]
    #[serde(default)]
    use_: Option<String>,
}

/// 按租户 JWKS 验签 Bearer 令牌 (RS256)。
/// 钥匙表启动时拉取一次, 之后由后台任务定期刷新, 验签本身是同步操作
#[derive(Clone)]
pub struct Auth0TokenVerifier {
    http: Client,
    cfg: Auth0Config,
    keys: Arc<RwLock<HashMap<String, DecodingKey>>>,
}

impl Auth0TokenVerifier {
    pub fn new(cfg: Auth0Config) -> Self {
        let http = Client::builder()
            .user_agent("lotto-backend/auth0")
            .build()
            .expect("reqwest client");
        Self {
            http,
            cfg,
            keys: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.cfg.domain)
    }

    pub fn issuer(&self) -> String {
        format!("https://{}/", self.cfg.domain)
    }

    /// 拉取租户 JWKS 并整体替换本地钥匙表, 返回可用钥匙数量
    pub async fn refresh_keys(&self) -> AppResult<usize> {
        let resp = self.http.get(self.jwks_url()).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::ExternalApiError(format!(
                "JWKS fetch failed: HTTP {}",
                status.as_u16()
            )));
        }
        let body: JwksResponse = resp.json().await?;

        let mut fresh = HashMap::new();
        for key in body.keys {
            if key.kty != "RSA" {
                continue;
            }
            if let Some(u) = &key.use_
                && u != "sig"
            {
                continue;
            }
            match DecodingKey::from_rsa_components(&key.n, &key.e) {
                Ok(decoding_key) => {
                    fresh.insert(key.kid, decoding_key);
                }
                Err(e) => log::warn!("Skipping unusable JWKS key {}: {e}", key.kid),
            }
        }
        if fresh.is_empty() {
            return Err(AppError::ExternalApiError(
                "JWKS contained no usable signing keys".to_string(),
            ));
        }

        let count = fresh.len();
        let mut keys = self
            .keys
            .write()
            .map_err(|_| AppError::InternalError("JWKS cache lock poisoned".to_string()))?;
        *keys = fresh;

        Ok(count)
    }

    /// 校验 Bearer 令牌: RS256 签名, issuer 与 audience 均须匹配
    pub fn verify_token(&self, token: &str) -> AppResult<Auth0Claims> {
        let header = decode_header(token)?;
        let kid = header
            .kid
            .ok_or_else(|| AppError::AuthError("Token has no key id".to_string()))?;

        let keys = self
            .keys
            .read()
            .map_err(|_| AppError::InternalError("JWKS cache lock poisoned".to_string()))?;
        let key = keys
            .get(&kid)
            .ok_or_else(|| AppError::AuthError("Token signed with unknown key".to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[self.issuer()]);
        validation.set_audience(&[self.cfg.audience.as_str()]);

        decode::<Auth0Claims>(token, key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }
}
