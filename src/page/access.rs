//! 页面访问控制

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Public,
    SignedIn,
    Creator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denied {
    /// 未登录
    SignInRequired,
    /// 已登录但不是创作者
    CreatorRequired,
}

impl Denied {
    pub fn title(&self) -> &'static str {
        match self {
            Denied::SignInRequired => "Please sign in",
            Denied::CreatorRequired => "Creator Access Required",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Denied::SignInRequired => "You need an account to view this page.",
            Denied::CreatorRequired => "You need a creator account to access this page.",
        }
    }
}

/// 已通过创作者校验的会话
///
/// 创作者专属的加载函数只接受这个类型，未通过校验时无法发起请求。
#[derive(Debug, Clone, Copy)]
pub struct CreatorPass<'a> {
    session: &'a Session,
}

impl<'a> CreatorPass<'a> {
    pub fn session(&self) -> &'a Session {
        self.session
    }
}

pub fn check(requirement: Requirement, session: Option<&Session>) -> Result<(), Denied> {
    match (requirement, session) {
        (Requirement::Public, _) => Ok(()),
        (_, None) => Err(Denied::SignInRequired),
        (Requirement::SignedIn, Some(_)) => Ok(()),
        (Requirement::Creator, Some(s)) if s.is_creator() => Ok(()),
        (Requirement::Creator, Some(_)) => Err(Denied::CreatorRequired),
    }
}

pub fn require_creator(session: Option<&Session>) -> Result<CreatorPass<'_>, Denied> {
    check(Requirement::Creator, session)?;
    session
        .map(|session| CreatorPass { session })
        .ok_or(Denied::SignInRequired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::session_with;
    use photoshare_shared::Role;

    #[test]
    fn creator_pages_reject_anonymous_and_consumers() {
        assert_eq!(require_creator(None).unwrap_err(), Denied::SignInRequired);

        let consumer = session_with(Role::Consumer);
        assert_eq!(
            require_creator(Some(&consumer)).unwrap_err(),
            Denied::CreatorRequired
        );

        let creator = session_with(Role::Creator);
        let pass = require_creator(Some(&creator)).unwrap();
        assert_eq!(pass.session().token, "t");
    }

    #[test]
    fn signed_in_requirement() {
        assert_eq!(check(Requirement::Public, None), Ok(()));
        assert_eq!(
            check(Requirement::SignedIn, None),
            Err(Denied::SignInRequired)
        );
        assert_eq!(
            check(Requirement::SignedIn, Some(&session_with(Role::Consumer))),
            Ok(())
        );
    }
}
