//! 会话管理
//!
//! 会话只在三个地方被写入：登录/注册、启动时恢复、登出。

use crate::api::PhotoShareApi;
use crate::error::{ApiError, ApiResult};
use crate::request::HttpClient;
use photoshare_shared::{AuthPayload, LoginRequest, RegisterRequest, Role, User};
use serde::{Deserialize, Serialize};

pub const SESSION_STORAGE_KEY: &str = "photoshare_session";
pub const MIN_PASSWORD_LEN: usize = 8;

/// 已登录的会话：令牌 + 用户快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn is_creator(&self) -> bool {
        self.user.is_creator()
    }

    /// 写入存储的 JSON 快照
    pub fn to_snapshot(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// 解析存储中的快照；令牌为空的快照不可用
    pub fn from_snapshot(raw: &str) -> serde_json::Result<Option<Session>> {
        let session: Session = serde_json::from_str(raw)?;
        Ok(Some(session).filter(|s| !s.token.trim().is_empty()))
    }
}

impl From<AuthPayload> for Session {
    fn from(payload: AuthPayload) -> Self {
        Self {
            token: payload.token,
            user: payload.user,
        }
    }
}

// =========================================================
// 持久化抽象
// =========================================================

pub trait SessionStore {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session);
    fn clear(&self);
}

/// 内存实现，用于原生环境与测试
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: std::cell::RefCell<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        self.slot.borrow().clone()
    }

    fn save(&self, session: &Session) {
        *self.slot.borrow_mut() = Some(session.clone());
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}

// =========================================================
// 凭证
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Credentials {
    SignIn {
        email: String,
        password: String,
    },
    SignUp {
        email: String,
        password: String,
        role: Role,
        display_name: String,
    },
}

impl Credentials {
    /// 同时给出 `role` 与 `name` 时为注册，否则为登录
    pub fn new(email: &str, password: &str, role: Option<Role>, name: Option<&str>) -> Self {
        match (role, name) {
            (Some(role), Some(name)) => Credentials::SignUp {
                email: email.trim().to_string(),
                password: password.to_string(),
                role,
                display_name: name.trim().to_string(),
            },
            _ => Credentials::SignIn {
                email: email.trim().to_string(),
                password: password.to_string(),
            },
        }
    }

    /// 提交前的本地校验
    pub fn validate(&self) -> ApiResult<()> {
        let (email, password) = match self {
            Credentials::SignIn { email, password } => (email, password),
            Credentials::SignUp {
                email,
                password,
                display_name,
                ..
            } => {
                if display_name.is_empty() {
                    return Err(ApiError::invalid_input("Display name is required"));
                }
                if password.chars().count() < MIN_PASSWORD_LEN {
                    return Err(ApiError::invalid_input(format!(
                        "Password must be at least {} characters",
                        MIN_PASSWORD_LEN
                    )));
                }
                (email, password)
            }
        };
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::invalid_input("Email and password are required"));
        }
        Ok(())
    }
}

// =========================================================
// 会话操作
// =========================================================

/// 登录或注册，成功后持久化会话
pub async fn login<C, S>(
    api: &PhotoShareApi<C>,
    store: &S,
    credentials: Credentials,
) -> ApiResult<Session>
where
    C: HttpClient,
    S: SessionStore + ?Sized,
{
    credentials.validate()?;

    let payload = match credentials {
        Credentials::SignIn { email, password } => {
            api.auth().login(&LoginRequest { email, password }).await?
        }
        Credentials::SignUp {
            email,
            password,
            role,
            display_name,
        } => {
            api.auth()
                .register(&RegisterRequest {
                    email,
                    password,
                    role,
                    display_name,
                })
                .await?
        }
    };

    let session = Session::from(payload);
    store.save(&session);
    tracing::info!(role = session.user.role.as_str(), "signed in");
    Ok(session)
}

/// 启动时恢复会话
///
/// 用持久化的令牌请求 `/users/me`；任何失败都会丢弃本地令牌。
pub async fn restore<C, S>(api: &PhotoShareApi<C>, store: &S) -> Option<Session>
where
    C: HttpClient,
    S: SessionStore + ?Sized,
{
    let saved = store.load()?;
    let authed = api.authorized(&saved.token);

    match authed.users().me().await {
        Ok(user) => {
            let session = Session {
                token: saved.token,
                user,
            };
            store.save(&session);
            Some(session)
        }
        Err(e) => {
            tracing::warn!(error = %e, "stored session rejected, discarding");
            store.clear();
            None
        }
    }
}

/// 同步登出，不发请求
pub fn logout<S: SessionStore + ?Sized>(store: &S) {
    store.clear();
    tracing::info!("signed out");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mock_api, url};
    use crate::error::ApiErrorKind;
    use crate::request::{HttpMethod, RequestBody};
    use serde_json::json;

    fn auth_reply(role: &str) -> serde_json::Value {
        json!({
            "data": {
                "token": "jwt-1",
                "user": { "_id": "u1", "email": "a@b.c", "displayName": "Ann", "role": role }
            }
        })
    }

    #[test]
    fn role_and_name_together_mean_signup() {
        assert!(matches!(
            Credentials::new("a@b.c", "pw", Some(Role::Creator), Some("Ann")),
            Credentials::SignUp { .. }
        ));
        assert!(matches!(
            Credentials::new("a@b.c", "pw", Some(Role::Creator), None),
            Credentials::SignIn { .. }
        ));
        assert!(matches!(
            Credentials::new("a@b.c", "pw", None, Some("Ann")),
            Credentials::SignIn { .. }
        ));
    }

    #[tokio::test]
    async fn login_persists_session() {
        let api = mock_api();
        let store = MemorySessionStore::new();
        api.client()
            .mock_response(HttpMethod::Post, &url("/auth/login"), 200, auth_reply("consumer"));

        let session = login(&api, &store, Credentials::new(" a@b.c ", "secret", None, None))
            .await
            .unwrap();

        assert_eq!(session.token, "jwt-1");
        assert!(!session.is_creator());
        assert_eq!(store.load(), Some(session));

        let req = api.client().last_request().unwrap();
        let Some(RequestBody::Json(body)) = req.body else {
            panic!("expected json body");
        };
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body, json!({ "email": "a@b.c", "password": "secret" }));
    }

    #[tokio::test]
    async fn signup_registers_with_role() {
        let api = mock_api();
        let store = MemorySessionStore::new();
        api.client()
            .mock_response(HttpMethod::Post, &url("/auth/register"), 201, auth_reply("creator"));

        let creds = Credentials::new("a@b.c", "longenough", Some(Role::Creator), Some("Ann"));
        let session = login(&api, &store, creds).await.unwrap();
        assert!(session.is_creator());

        let Some(RequestBody::Json(body)) = api.client().last_request().unwrap().body else {
            panic!("expected json body");
        };
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["role"], "creator");
        assert_eq!(body["displayName"], "Ann");
    }

    #[tokio::test]
    async fn short_password_never_reaches_server() {
        let api = mock_api();
        let store = MemorySessionStore::new();
        let creds = Credentials::new("a@b.c", "short", Some(Role::Consumer), Some("Ann"));

        let err = login(&api, &store, creds).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::InvalidInput);
        assert_eq!(api.client().request_count(), 0);
        assert!(store.load().is_none());
    }

    #[tokio::test]
    async fn rejected_login_shows_server_message() {
        let api = mock_api();
        let store = MemorySessionStore::new();
        api.client().mock_response(
            HttpMethod::Post,
            &url("/auth/login"),
            401,
            json!({ "message": "Invalid email or password" }),
        );

        let err = login(&api, &store, Credentials::new("a@b.c", "nope", None, None))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Invalid email or password");
        assert!(store.load().is_none());
    }

    #[tokio::test]
    async fn restore_refreshes_user_snapshot() {
        let api = mock_api();
        let store = MemorySessionStore::new();
        store.save(&Session {
            token: "jwt-old".into(),
            user: User::default(),
        });
        api.client().mock_response(
            HttpMethod::Get,
            &url("/users/me"),
            200,
            json!({ "data": { "_id": "u1", "email": "a@b.c", "name": "Ann", "role": "creator" } }),
        );

        let session = restore(&api, &store).await.unwrap();
        assert_eq!(session.token, "jwt-old");
        assert_eq!(session.user.display_name(), "Ann");

        let req = api.client().last_request().unwrap();
        assert_eq!(req.headers.get("Authorization").unwrap(), "Bearer jwt-old");
        assert_eq!(store.load().unwrap().user.email, "a@b.c");
    }

    #[tokio::test]
    async fn restore_failure_discards_token() {
        let api = mock_api();
        let store = MemorySessionStore::new();
        store.save(&Session {
            token: "expired".into(),
            user: User::default(),
        });
        api.client().mock_response(
            HttpMethod::Get,
            &url("/users/me"),
            401,
            json!({ "message": "Token expired" }),
        );

        assert!(restore(&api, &store).await.is_none());
        assert!(store.load().is_none());
    }

    #[tokio::test]
    async fn restore_without_saved_session_is_silent() {
        let api = mock_api();
        let store = MemorySessionStore::new();
        assert!(restore(&api, &store).await.is_none());
        assert_eq!(api.client().request_count(), 0);
    }

    #[test]
    fn logout_clears_store() {
        let store = MemorySessionStore::new();
        store.save(&Session {
            token: "t".into(),
            user: User::default(),
        });
        logout(&store);
        assert!(store.load().is_none());
    }

    #[test]
    fn snapshot_survives_storage_round_trip() {
        let session = Session {
            token: "tok".into(),
            user: serde_json::from_value(json!({ "_id": "u1", "email": "a@b.c", "role": "creator" }))
                .unwrap(),
        };
        let raw = session.to_snapshot().unwrap();
        assert_eq!(Session::from_snapshot(&raw).unwrap(), Some(session));

        let blank = r#"{"token":"  ","user":{"_id":"u1","email":"a@b.c"}}"#;
        assert_eq!(Session::from_snapshot(blank).unwrap(), None);
        assert!(Session::from_snapshot("{not json").is_err());
    }
}
